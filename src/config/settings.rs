use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::prayer_times::DEFAULT_GRACE_MINUTES;
use crate::qibla::GeoCoordinate;
use crate::storage::KeyValueStore;

// ─── Installation config (TOML file) ────────────────────────────────────────

fn default_location_name() -> String {
    "Cairo".to_string()
}
fn default_latitude() -> f64 {
    30.0444
}
fn default_longitude() -> f64 {
    31.2357
}
fn default_calc_method() -> String {
    "Egyptian".to_string()
}
fn default_madhab() -> String {
    "Shafi".to_string()
}
fn default_timezone_offset() -> i32 {
    120
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl LocationConfig {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    #[serde(default = "default_calc_method")]
    pub method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    /// Minutes from UTC for rendering local times.
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32,
    /// Days to add/subtract from the Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind, +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Path to a user-supplied content pack; the bundled pack is used
    /// when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "rafiq").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("rafiq.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

// ─── User settings (key-value store) ────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Hijri,
    Gregorian,
}

impl CalendarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarType::Hijri => "hijri",
            CalendarType::Gregorian => "gregorian",
        }
    }
}

impl FromStr for CalendarType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hijri" => Ok(CalendarType::Hijri),
            "gregorian" => Ok(CalendarType::Gregorian),
            _ => Err(anyhow::anyhow!("Unknown calendar type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl FromStr for FontSize {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(anyhow::anyhow!("Unknown font size: {}", s)),
        }
    }
}

fn default_reminder_lead() -> u32 {
    5
}
fn default_grace_minutes() -> u32 {
    DEFAULT_GRACE_MINUTES
}

const SETTINGS_KEY: &str = "settings";

/// The user-tunable state of the app. Lives as one JSON document in the
/// key-value store; loading with missing fields fills in defaults, so
/// old snapshots keep working as settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub calendar_type: CalendarType,
    #[serde(default = "default_true")]
    pub prayer_notifications: bool,
    #[serde(default = "default_true")]
    pub imsakia_notifications: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default = "default_reminder_lead")]
    pub reminder_lead_minutes: u32,
    /// Index into the content pack's athan recordings.
    #[serde(default)]
    pub athan_voice: usize,
    /// How long a prayer stays "current" after its start.
    #[serde(default = "default_grace_minutes")]
    pub grace_minutes: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            calendar_type: CalendarType::default(),
            prayer_notifications: true,
            imsakia_notifications: true,
            dark_mode: false,
            font_size: FontSize::default(),
            reminder_lead_minutes: default_reminder_lead(),
            athan_voice: 0,
            grace_minutes: default_grace_minutes(),
        }
    }
}

impl UserSettings {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        match store.get(SETTINGS_KEY)? {
            Some(json) => serde_json::from_str(&json).context("Parsing stored settings"),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(SETTINGS_KEY, &serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.location.name = "Alexandria".to_string();
        config.location.latitude = 31.2001;
        config.location.longitude = 29.9187;
        config.calculation.hijri_offset = -1;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.location.name, "Alexandria");
        assert_eq!(loaded.calculation.hijri_offset, -1);
        assert_eq!(loaded.calculation.method, "Egyptian");
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.location.name, "Cairo");
        assert!(config.content.path.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[location]\nname = \"Giza\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.location.name, "Giza");
        assert_eq!(config.location.latitude, default_latitude());
        assert_eq!(config.calculation.madhab, "Shafi");
    }

    #[test]
    fn settings_round_trip_through_a_store() {
        let mut store = MemoryStore::default();
        let mut settings = UserSettings::default();
        settings.calendar_type = CalendarType::Gregorian;
        settings.grace_minutes = 15;
        settings.save(&mut store).unwrap();

        let loaded = UserSettings::load(&store).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn settings_load_defaults_and_tolerate_old_documents() {
        let store = MemoryStore::default();
        assert_eq!(UserSettings::load(&store).unwrap(), UserSettings::default());

        // A document written before grace_minutes existed.
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, r#"{"dark_mode":true}"#).unwrap();
        let loaded = UserSettings::load(&store).unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.grace_minutes, DEFAULT_GRACE_MINUTES);
        assert!(loaded.prayer_notifications);
    }
}
