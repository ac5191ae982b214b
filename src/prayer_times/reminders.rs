use crate::models::{PrayerSchedule, PrayerType};

/// A reminder instant, `lead` minutes ahead of a prayer's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub prayer: PrayerType,
    /// Minutes since midnight at which the reminder fires.
    pub at_minutes: u32,
}

/// Plan the reminders still ahead of `now`. Entries whose reminder
/// instant has already passed (or that have no valid time) are skipped.
/// Arming the timers is the caller's job; this is pure arithmetic.
pub fn plan_reminders(
    schedule: &PrayerSchedule,
    now_minutes: u32,
    lead_minutes: u32,
) -> Vec<Reminder> {
    let mut reminders = Vec::new();
    for prayer in PrayerType::all() {
        let Some(start) = schedule.minutes(prayer) else {
            continue;
        };
        let fire_at = start.saturating_sub(lead_minutes);
        if fire_at > now_minutes {
            reminders.push(Reminder {
                prayer,
                at_minutes: fire_at,
            });
        }
    }
    reminders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_future_reminders_are_planned() {
        let schedule = PrayerSchedule::new("04:30", "12:00", "15:30", "18:45", "20:00");
        // 13:00, five-minute lead: Dhuhr's reminder is behind us.
        let reminders = plan_reminders(&schedule, 13 * 60, 5);
        assert_eq!(
            reminders,
            vec![
                Reminder {
                    prayer: PrayerType::Asr,
                    at_minutes: 15 * 60 + 25,
                },
                Reminder {
                    prayer: PrayerType::Maghrib,
                    at_minutes: 18 * 60 + 40,
                },
                Reminder {
                    prayer: PrayerType::Isha,
                    at_minutes: 19 * 60 + 55,
                },
            ]
        );
    }

    #[test]
    fn missing_entries_are_skipped() {
        let mut schedule = PrayerSchedule::new("04:30", "12:00", "15:30", "18:45", "20:00");
        schedule.maghrib = None;
        let reminders = plan_reminders(&schedule, 16 * 60, 10);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].prayer, PrayerType::Isha);
    }

    #[test]
    fn lead_larger_than_start_clamps_at_midnight() {
        let schedule = PrayerSchedule::new("00:30", "12:00", "15:30", "18:45", "20:00");
        // A one-hour lead on a 00:30 Fajr would go negative; it clamps
        // to minute 0, which is never strictly ahead of now=0.
        let reminders = plan_reminders(&schedule, 0, 60);
        assert!(reminders.iter().all(|r| r.prayer != PrayerType::Fajr));
    }
}
