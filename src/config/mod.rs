pub mod settings;

pub use settings::{
    AppConfig, CalculationConfig, CalendarType, ContentConfig, FontSize, LocationConfig,
    UserSettings,
};
