#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    /// The five daily prayers in chronological daily order.
    pub fn all() -> [PrayerType; 5] {
        [
            PrayerType::Fajr,
            PrayerType::Dhuhr,
            PrayerType::Asr,
            PrayerType::Maghrib,
            PrayerType::Isha,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "fajr",
            PrayerType::Dhuhr => "dhuhr",
            PrayerType::Asr => "asr",
            PrayerType::Maghrib => "maghrib",
            PrayerType::Isha => "isha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }

    pub fn arabic_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "الفجر",
            PrayerType::Dhuhr => "الظهر",
            PrayerType::Asr => "العصر",
            PrayerType::Maghrib => "المغرب",
            PrayerType::Isha => "العشاء",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerType::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerType::Dhuhr),
            "asr" => Ok(PrayerType::Asr),
            "maghrib" => Ok(PrayerType::Maghrib),
            "isha" => Ok(PrayerType::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

/// Where a prayer's grace window stands relative to the current clock
/// reading. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    Upcoming,
    Current,
    Passed,
    /// The schedule had no valid time for this prayer.
    Unknown,
}

impl WindowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WindowStatus::Upcoming => "upcoming",
            WindowStatus::Current => "current",
            WindowStatus::Passed => "passed",
            WindowStatus::Unknown => "—",
        }
    }
}

/// Parse an `HH:MM` 24-hour time-of-day string into minutes since
/// midnight. Hours must be 0–23 and minutes 0–59; anything else is
/// rejected rather than clamped.
pub fn parse_hhmm(s: &str) -> Option<u32> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// The day's five prayer start times as `HH:MM` strings. Produced once
/// per day by a schedule source and treated as immutable afterwards.
/// Entries are optional so that a partial upstream answer still renders;
/// the window evaluator reports missing entries explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    pub fajr: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

impl PrayerSchedule {
    pub fn new(fajr: &str, dhuhr: &str, asr: &str, maghrib: &str, isha: &str) -> Self {
        Self {
            fajr: Some(fajr.to_string()),
            dhuhr: Some(dhuhr.to_string()),
            asr: Some(asr.to_string()),
            maghrib: Some(maghrib.to_string()),
            isha: Some(isha.to_string()),
        }
    }

    pub fn raw(&self, prayer: PrayerType) -> Option<&str> {
        let slot = match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Dhuhr => &self.dhuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, prayer: PrayerType, time: impl Into<String>) {
        let slot = match prayer {
            PrayerType::Fajr => &mut self.fajr,
            PrayerType::Dhuhr => &mut self.dhuhr,
            PrayerType::Asr => &mut self.asr,
            PrayerType::Maghrib => &mut self.maghrib,
            PrayerType::Isha => &mut self.isha,
        };
        *slot = Some(time.into());
    }

    /// The prayer's start as minutes since midnight, or `None` when the
    /// entry is absent or does not parse as a valid `HH:MM`.
    pub fn minutes(&self, prayer: PrayerType) -> Option<u32> {
        self.raw(prayer).and_then(parse_hhmm)
    }

    /// True when all five entries are present and parseable.
    pub fn is_complete(&self) -> bool {
        PrayerType::all().iter().all(|p| self.minutes(*p).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hhmm_accepts_valid_times() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("04:30"), Some(270));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("4:05"), Some(245));
    }

    #[test]
    fn parse_hhmm_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("ab:cd"), None);
        assert_eq!(parse_hhmm("1230"), None);
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("-1:30"), None);
        assert_eq!(parse_hhmm("18:45 (EET)"), None);
    }

    #[test]
    fn schedule_minutes_and_completeness() {
        let mut schedule = PrayerSchedule::new("04:30", "12:00", "15:30", "18:45", "20:00");
        assert!(schedule.is_complete());
        assert_eq!(schedule.minutes(PrayerType::Maghrib), Some(18 * 60 + 45));

        schedule.isha = None;
        assert!(!schedule.is_complete());
        assert_eq!(schedule.minutes(PrayerType::Isha), None);

        schedule.set(PrayerType::Isha, "20:15");
        assert_eq!(schedule.minutes(PrayerType::Isha), Some(20 * 60 + 15));
    }

    #[test]
    fn prayer_type_round_trips_through_str() {
        for p in PrayerType::all() {
            assert_eq!(p.as_str().parse::<PrayerType>().unwrap(), p);
        }
        assert_eq!("Zuhr".parse::<PrayerType>().unwrap(), PrayerType::Dhuhr);
        assert!("midnight".parse::<PrayerType>().is_err());
    }
}
