//! Reactive core: every user action is an `AppEvent`, every mutation
//! goes through `dispatch`, and whatever must happen outside the state
//! (persist, notify) comes back as `Effect`s for the shell to execute.
//! Nothing in here knows how the app is rendered.

// The event and page enumerations cover the whole app surface, not just
// what the current shell wires up.
#![allow(dead_code)]

use std::str::FromStr;

use crate::config::{CalendarType, FontSize, UserSettings};
use crate::tasbih::{TapOutcome, TasbihState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Prayers,
    Qibla,
    Tasbih,
    Hadith,
    Recipes,
    Imsakia,
    Duas,
    Settings,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Prayers => "prayers",
            Page::Qibla => "qibla",
            Page::Tasbih => "tasbih",
            Page::Hadith => "hadith",
            Page::Recipes => "recipes",
            Page::Imsakia => "imsakia",
            Page::Duas => "duas",
            Page::Settings => "settings",
        }
    }
}

impl FromStr for Page {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dashboard" => Ok(Page::Dashboard),
            "prayers" => Ok(Page::Prayers),
            "qibla" => Ok(Page::Qibla),
            "tasbih" => Ok(Page::Tasbih),
            "hadith" => Ok(Page::Hadith),
            "recipes" => Ok(Page::Recipes),
            "imsakia" => Ok(Page::Imsakia),
            "duas" => Ok(Page::Duas),
            "settings" => Ok(Page::Settings),
            _ => Err(anyhow::anyhow!("Unknown page: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Every input the app reacts to, independent of where it came from
/// (a CLI flag today, a key press or tap in another shell tomorrow).
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PageSelected(Page),
    DarkModeToggled,
    DarkModeSet(bool),
    FontSizeSet(FontSize),
    CalendarTypeSet(CalendarType),
    PrayerNotificationsSet(bool),
    ImsakiaNotificationsSet(bool),
    ReminderLeadSet(u32),
    AthanVoiceSet(usize),
    GraceMinutesSet(u32),
    TasbihTapped { count: u32 },
    TasbihReset,
    DhikrAdvanced,
    TasbihTargetSet(u32),
    DataCleared,
}

/// What the shell must do after a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SaveSettings,
    SaveTasbih,
    ClearStore,
    Notify(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub page: Page,
    pub settings: UserSettings,
    pub tasbih: TasbihState,
}

impl AppState {
    pub fn new(settings: UserSettings, tasbih: TasbihState) -> Self {
        Self {
            page: Page::Dashboard,
            settings,
            tasbih,
        }
    }
}

/// The single mutation path: apply `event` to `state` and report the
/// effects the shell owes.
pub fn dispatch(state: &mut AppState, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::PageSelected(page) => {
            state.page = page;
            vec![]
        }
        AppEvent::DarkModeToggled => {
            state.settings.dark_mode = !state.settings.dark_mode;
            vec![Effect::SaveSettings]
        }
        AppEvent::DarkModeSet(on) => {
            state.settings.dark_mode = on;
            vec![Effect::SaveSettings]
        }
        AppEvent::FontSizeSet(size) => {
            state.settings.font_size = size;
            vec![Effect::SaveSettings]
        }
        AppEvent::CalendarTypeSet(calendar) => {
            state.settings.calendar_type = calendar;
            vec![Effect::SaveSettings]
        }
        AppEvent::PrayerNotificationsSet(on) => {
            state.settings.prayer_notifications = on;
            vec![Effect::SaveSettings]
        }
        AppEvent::ImsakiaNotificationsSet(on) => {
            state.settings.imsakia_notifications = on;
            vec![Effect::SaveSettings]
        }
        AppEvent::ReminderLeadSet(minutes) => {
            state.settings.reminder_lead_minutes = minutes;
            vec![Effect::SaveSettings]
        }
        AppEvent::AthanVoiceSet(index) => {
            state.settings.athan_voice = index;
            vec![Effect::SaveSettings]
        }
        AppEvent::GraceMinutesSet(minutes) => {
            state.settings.grace_minutes = minutes;
            vec![Effect::SaveSettings]
        }
        AppEvent::TasbihTapped { count } => match state.tasbih.tap(count) {
            TapOutcome::Completed => vec![
                Effect::SaveTasbih,
                Effect::Notify(Notice::success(format!(
                    "{} — {} complete",
                    state.tasbih.current_phrase().text,
                    state.tasbih.target()
                ))),
            ],
            TapOutcome::Counted => vec![Effect::SaveTasbih],
            TapOutcome::AlreadyComplete => vec![Effect::Notify(Notice::info(
                "Target already met — reset or move to the next dhikr",
            ))],
        },
        AppEvent::TasbihReset => {
            state.tasbih.reset();
            vec![Effect::SaveTasbih]
        }
        AppEvent::DhikrAdvanced => {
            state.tasbih.advance();
            vec![Effect::SaveTasbih]
        }
        AppEvent::TasbihTargetSet(target) => {
            state.tasbih.set_target(target);
            vec![Effect::SaveTasbih]
        }
        AppEvent::DataCleared => {
            state.settings = UserSettings::default();
            state.tasbih = TasbihState::default();
            vec![
                Effect::ClearStore,
                Effect::Notify(Notice::success("All local data cleared")),
            ]
        }
    }
}
