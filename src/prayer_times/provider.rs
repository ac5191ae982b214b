use anyhow::{anyhow, Result};
use chrono::{FixedOffset, NaiveDate};
use salah::prelude::*;

use crate::models;
use crate::models::PrayerType;
use crate::qibla::GeoCoordinate;

/// Supplies the day's schedule. The window evaluator never fetches or
/// computes times itself; it only consumes what a source hands it.
pub trait ScheduleSource {
    fn schedule_for(&self, date: NaiveDate) -> Result<models::PrayerSchedule>;
}

/// Offline astronomical schedule source backed by the `salah` crate.
/// Times come out as local `HH:MM` strings for a fixed UTC offset.
pub struct SalahScheduleSource {
    location: GeoCoordinate,
    method_str: String,
    madhab_str: String,
    tz_offset_minutes: i32,
}

impl SalahScheduleSource {
    pub fn new(
        location: GeoCoordinate,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate location + method + madhab early
        location.validate()?;
        parse_method(method)?;
        parse_madhab(madhab)?;
        Ok(Self {
            location,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }
}

impl ScheduleSource for SalahScheduleSource {
    fn schedule_for(&self, date: NaiveDate) -> Result<models::PrayerSchedule> {
        let coords = Coordinates::new(self.location.latitude, self.location.longitude);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> String {
            utc.with_timezone(&offset).time().format("%H:%M").to_string()
        };

        let mut schedule = models::PrayerSchedule::default();
        schedule.set(PrayerType::Fajr, to_local(times.time(Prayer::Fajr)));
        schedule.set(PrayerType::Dhuhr, to_local(times.time(Prayer::Dhuhr)));
        schedule.set(PrayerType::Asr, to_local(times.time(Prayer::Asr)));
        schedule.set(PrayerType::Maghrib, to_local(times.time(Prayer::Maghrib)));
        schedule.set(PrayerType::Isha, to_local(times.time(Prayer::Isha)));
        Ok(schedule)
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!("Unknown calculation method: '{}'", s)),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

pub const MADHABS: &[&str] = &["Hanafi", "Shafi"];
