pub mod evaluator;
pub mod provider;
pub mod reminders;

pub use evaluator::{classify_prayers, MissingTime, NextPrayer, WindowReport, DEFAULT_GRACE_MINUTES};
pub use provider::{SalahScheduleSource, ScheduleSource, CALC_METHODS, MADHABS};
pub use reminders::{plan_reminders, Reminder};
