pub mod content;
pub mod dhikr;
pub mod prayer;

pub use content::{Dua, Hadith, ImsakiaDay, Recipe};
pub use dhikr::DhikrPhrase;
pub use prayer::{parse_hhmm, PrayerSchedule, PrayerType, WindowStatus};
