//! Classifies the day's prayers against a clock reading.
//!
//! The caller supplies `now` as minutes since midnight in its own local
//! time zone; no clock is read here and no state is retained between
//! calls, so repeated invocations with an advancing `now` are all this
//! module ever sees of time.

use thiserror::Error;

use crate::models::{PrayerSchedule, PrayerType, WindowStatus};

/// Span after a prayer's nominal start during which it still counts as
/// the current prayer, unless the caller configures otherwise.
pub const DEFAULT_GRACE_MINUTES: u32 = 10;

/// A schedule entry that was absent or did not parse as `HH:MM`.
/// Reported per entry inside the report so the remaining prayers still
/// classify normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no valid time for {0}")]
pub struct MissingTime(pub PrayerType);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: PrayerType,
    pub seconds_until: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowReport {
    /// The prayer whose grace window contains `now`, if any. When an
    /// oversized grace value makes windows overlap, the first match in
    /// daily order wins.
    pub current: Option<PrayerType>,
    /// Prayers whose grace window has closed, in daily order.
    pub passed: Vec<PrayerType>,
    /// The soonest prayer still ahead of `now`. `None` once all five
    /// have passed — rolling over to tomorrow's Fajr is the caller's
    /// job, with tomorrow's schedule.
    pub next: Option<NextPrayer>,
    /// Entries that could not participate in classification.
    pub missing: Vec<MissingTime>,
}

impl WindowReport {
    pub fn status(&self, prayer: PrayerType) -> WindowStatus {
        if self.missing.iter().any(|m| m.0 == prayer) {
            WindowStatus::Unknown
        } else if self.current == Some(prayer) {
            WindowStatus::Current
        } else if self.passed.contains(&prayer) {
            WindowStatus::Passed
        } else {
            WindowStatus::Upcoming
        }
    }
}

/// Classify every prayer of `schedule` against `now_minutes`.
///
/// A prayer is current while `now` lies in `[t, t + grace)`, passed once
/// `now >= t + grace`, and upcoming otherwise. The next prayer is the
/// chronologically soonest one whose start exceeds `now`; its countdown
/// is whole minutes expressed in seconds.
pub fn classify_prayers(
    schedule: &PrayerSchedule,
    now_minutes: u32,
    grace_minutes: u32,
) -> WindowReport {
    let mut report = WindowReport::default();

    for prayer in PrayerType::all() {
        let Some(start) = schedule.minutes(prayer) else {
            report.missing.push(MissingTime(prayer));
            continue;
        };

        if now_minutes >= start + grace_minutes {
            report.passed.push(prayer);
        } else if now_minutes >= start {
            if report.current.is_none() {
                report.current = Some(prayer);
            }
        } else {
            let candidate = NextPrayer {
                prayer,
                seconds_until: i64::from(start - now_minutes) * 60,
            };
            // Strict `<` keeps the earlier prayer of the day on a tie.
            if report
                .next
                .is_none_or(|n| candidate.seconds_until < n.seconds_until)
            {
                report.next = Some(candidate);
            }
        }
    }

    report
}
