use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

use crate::config::CalendarType;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

pub const RAMADAN_MONTH: usize = 9;
pub const RAMADAN_DAYS: u32 = 30;

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
    pub month_name: String,
}

impl HijriInfo {
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name, self.year)
    }
}

/// Convert a Gregorian date, shifted by `offset_days` for local moon
/// sighting differences (e.g., -1 if your country is one day behind
/// Saudi Arabia).
pub fn to_hijri(date: NaiveDate, offset_days: i32) -> Result<HijriInfo> {
    let adjusted = date + Duration::days(offset_days as i64);
    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    let month = hd.month();
    Ok(HijriInfo {
        day: hd.day(),
        month,
        year: hd.year(),
        month_name: hijri_month_name(month).to_string(),
    })
}

/// The date line shown at the top of most commands, in the calendar the
/// user asked for. Falls back to Gregorian when conversion fails.
pub fn date_line(date: NaiveDate, calendar: CalendarType, hijri_offset: i32) -> String {
    match calendar {
        CalendarType::Gregorian => date.format("%d %B %Y").to_string(),
        CalendarType::Hijri => match to_hijri(date, hijri_offset) {
            Ok(info) => info.formatted(),
            Err(_) => date.format("%d %B %Y").to_string(),
        },
    }
}

pub struct RamadanProgress {
    pub day: u32,
    pub percent: f64,
}

/// Progress through a 30-day Ramadan given a Hijri day and month;
/// `None` outside Ramadan.
pub fn ramadan_progress_from_hijri(day: usize, month: usize) -> Option<RamadanProgress> {
    if month != RAMADAN_MONTH {
        return None;
    }
    let day = (day as u32).clamp(1, RAMADAN_DAYS);
    Some(RamadanProgress {
        day,
        percent: day as f64 / RAMADAN_DAYS as f64 * 100.0,
    })
}

pub fn ramadan_progress(date: NaiveDate, hijri_offset: i32) -> Option<RamadanProgress> {
    let info = to_hijri(date, hijri_offset).ok()?;
    ramadan_progress_from_hijri(info.day, info.month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(hijri_month_name(1), "Muharram");
        assert_eq!(hijri_month_name(9), "Ramadan");
        assert_eq!(hijri_month_name(12), "Dhu al-Hijjah");
        assert_eq!(hijri_month_name(0), "Unknown");
        assert_eq!(hijri_month_name(13), "Unknown");
    }

    #[test]
    fn ramadan_progress_only_inside_ramadan() {
        assert!(ramadan_progress_from_hijri(10, 8).is_none());
        assert!(ramadan_progress_from_hijri(1, 10).is_none());

        let start = ramadan_progress_from_hijri(1, 9).unwrap();
        assert_eq!(start.day, 1);
        let mid = ramadan_progress_from_hijri(15, 9).unwrap();
        assert_eq!(mid.day, 15);
        assert!((mid.percent - 50.0).abs() < 0.5);

        // Out-of-range day from a divergent sighting clamps.
        let clamped = ramadan_progress_from_hijri(31, 9).unwrap();
        assert_eq!(clamped.day, 30);
        assert_eq!(clamped.percent, 100.0);
    }

    #[test]
    fn conversion_produces_a_plausible_hijri_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let info = to_hijri(date, 0).unwrap();
        assert!((1..=30).contains(&info.day));
        assert!((1..=12).contains(&info.month));
        assert!((1440..=1460).contains(&info.year));
        assert!(!info.formatted().is_empty());
    }

    #[test]
    fn offset_shifts_the_converted_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let base = to_hijri(date, 0).unwrap();
        let behind = to_hijri(date, -1).unwrap();
        // Shifting the Gregorian input by a day moves the Hijri result.
        assert_ne!(
            (base.day, base.month),
            (behind.day, behind.month)
        );
    }

    #[test]
    fn gregorian_date_line_ignores_hijri_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let line = date_line(date, CalendarType::Gregorian, -1);
        assert_eq!(line, "18 February 2026");
    }
}
