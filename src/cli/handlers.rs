use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, Timelike};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use crate::cli::args::{SettingsCommands, TasbihCommands};
use crate::config::{AppConfig, CalendarType, FontSize, UserSettings};
use crate::content::ContentPack;
use crate::events::{dispatch, AppEvent, AppState, Effect, Notice, NoticeLevel, Page};
use crate::models::{parse_hhmm, PrayerType, WindowStatus};
use crate::prayer_times::{
    classify_prayers, plan_reminders, SalahScheduleSource, ScheduleSource, CALC_METHODS, MADHABS,
};
use crate::qibla::{qibla_bearing, FixedLocation, GeoCoordinate, LocationSource};
use crate::storage::{export_snapshot, import_snapshot, KeyValueStore};
use crate::tasbih::TasbihState;
use crate::utils::format::{
    compass_point, countdown_hhmmss, format_duration_secs, minutes_to_hhmm, pad_display,
    progress_bar,
};
use crate::utils::hijri;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

/// Minutes since local midnight — the one place the shell reads a clock
/// before handing plain numbers to the core.
fn now_minutes() -> u32 {
    let now = Local::now().time();
    now.hour() * 60 + now.minute()
}

fn schedule_source(config: &AppConfig) -> Result<SalahScheduleSource> {
    SalahScheduleSource::new(
        config.location.coordinate(),
        &config.calculation.method,
        &config.calculation.madhab,
        config.calculation.timezone_offset,
    )
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println_colored!(GREEN, "  ✓ {}", notice.message),
        NoticeLevel::Info => println_colored!(DIM, "  {}", notice.message),
        NoticeLevel::Warning => println_colored!(AMBER, "  ! {}", notice.message),
        NoticeLevel::Error => println_colored!(RED, "  ✗ {}", notice.message),
    }
}

/// Run the effects a dispatch handed back.
fn apply_effects(
    state: &AppState,
    store: &mut dyn KeyValueStore,
    effects: Vec<Effect>,
) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::SaveSettings => state.settings.save(store)?,
            Effect::SaveTasbih => state.tasbih.save(store)?,
            Effect::ClearStore => store.clear()?,
            Effect::Notify(notice) => print_notice(&notice),
        }
    }
    Ok(())
}

// ─── Setup ───────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn handle_setup(
    config: &mut AppConfig,
    location: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    method: Option<String>,
    madhab: Option<String>,
    tz_offset: Option<i32>,
    hijri_offset: Option<i32>,
    list_methods: bool,
) -> Result<()> {
    if list_methods {
        println!();
        println_colored!(GOLD, "  Calculation methods");
        for m in CALC_METHODS {
            println!("    {}", m);
        }
        println_colored!(GOLD, "  Madhabs");
        for m in MADHABS {
            println!("    {}", m);
        }
        println!();
        return Ok(());
    }

    let changed = location.is_some()
        || lat.is_some()
        || lon.is_some()
        || method.is_some()
        || madhab.is_some()
        || tz_offset.is_some()
        || hijri_offset.is_some();

    if let Some(name) = location {
        config.location.name = name;
    }
    if let Some(lat) = lat {
        config.location.latitude = lat;
    }
    if let Some(lon) = lon {
        config.location.longitude = lon;
    }
    if let Some(method) = method {
        config.calculation.method = method;
    }
    if let Some(madhab) = madhab {
        config.calculation.madhab = madhab;
    }
    if let Some(offset) = tz_offset {
        config.calculation.timezone_offset = offset;
    }
    if let Some(offset) = hijri_offset {
        config.calculation.hijri_offset = offset;
    }

    // Building a source validates coordinates, method and madhab in one go.
    schedule_source(config).context("Rejecting configuration")?;

    if changed {
        config.save()?;
        println_colored!(GREEN, "  ✓ Configuration saved");
    }

    println!();
    println_colored!(GOLD, "  Location");
    println!(
        "    {} ({:.4}, {:.4})",
        config.location.name, config.location.latitude, config.location.longitude
    );
    println_colored!(GOLD, "  Calculation");
    println!(
        "    {} / {} — UTC{:+} min, hijri {:+} days",
        config.calculation.method,
        config.calculation.madhab,
        config.calculation.timezone_offset,
        config.calculation.hijri_offset
    );
    println!();
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    config: &AppConfig,
    store: &dyn KeyValueStore,
    pack: &ContentPack,
    grace_override: Option<u32>,
) -> Result<()> {
    let settings = UserSettings::load(store)?;
    let grace = grace_override.unwrap_or(settings.grace_minutes);
    let today = Local::now().date_naive();
    let now = now_minutes();

    let source = schedule_source(config)?;
    let schedule = source.schedule_for(today)?;
    let report = classify_prayers(&schedule, now, grace);
    log::debug!("window report at minute {}: {:?}", now, report);

    let date_line = hijri::date_line(
        today,
        settings.calendar_type,
        config.calculation.hijri_offset,
    );

    println!();
    println_colored!(GOLD, "  Prayer Times — {} ({})", config.location.name, date_line);
    println!();

    for prayer in PrayerType::all() {
        let time_str = schedule
            .minutes(prayer)
            .map(minutes_to_hhmm)
            .unwrap_or_else(|| "--:--".to_string());
        let status = report.status(prayer);
        let line = format!(
            "  {}  {}  {}  {}",
            pad_display(prayer.display_name(), 8),
            pad_display(prayer.arabic_name(), 7),
            time_str,
            status.label()
        );
        match status {
            WindowStatus::Current => println_colored!(GOLD, "{}", line),
            WindowStatus::Passed => println_colored!(DIM, "{}", line),
            WindowStatus::Upcoming => println_colored!(BOLD, "{}", line),
            WindowStatus::Unknown => println_colored!(RED, "{}", line),
        }
    }

    for missing in &report.missing {
        print_notice(&Notice::error(missing.to_string()));
    }

    println!();
    match report.next {
        Some(next) => println_colored!(
            AMBER,
            "  Next: {} in {}",
            next.prayer.display_name(),
            format_duration_secs(next.seconds_until)
        ),
        None if report.missing.is_empty() => {
            println_colored!(DIM, "  All prayers for today have passed")
        }
        None => {}
    }

    if settings.prayer_notifications {
        for reminder in plan_reminders(&schedule, now, settings.reminder_lead_minutes) {
            println_colored!(
                DIM,
                "  Reminder: {} at {}",
                reminder.prayer.display_name(),
                minutes_to_hhmm(reminder.at_minutes)
            );
        }
    }

    if let Some(progress) =
        hijri::ramadan_progress(today, config.calculation.hijri_offset)
    {
        println!();
        println_colored!(
            GOLD,
            "  Ramadan day {} of {}  {} {:.0}%",
            progress.day,
            hijri::RAMADAN_DAYS,
            progress_bar(progress.day, hijri::RAMADAN_DAYS, 20),
            progress.percent
        );
        if settings.imsakia_notifications {
            if let Some(row) = pack.imsakia_for_day(progress.day) {
                println_colored!(
                    DIM,
                    "  Suhoor until {} — iftar at {}",
                    row.suhoor,
                    row.iftar
                );
                if let Some(iftar) = parse_hhmm(&row.iftar) {
                    if iftar > now {
                        println_colored!(
                            AMBER,
                            "  Iftar in {}",
                            countdown_hhmmss(i64::from(iftar - now) * 60)
                        );
                    }
                }
            }
        }
    }
    println!();
    Ok(())
}

// ─── Qibla ───────────────────────────────────────────────────────────────────

pub fn handle_qibla(config: &AppConfig, lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    let (origin, label) = match (lat, lon) {
        (Some(lat), Some(lon)) => (
            GeoCoordinate::new(lat, lon),
            format!("{:.4}, {:.4}", lat, lon),
        ),
        (None, None) => {
            let source = FixedLocation(config.location.coordinate());
            let origin = source
                .current_location()
                .ok_or_else(|| anyhow!("No location available — run `rafiq setup` first"))?;
            (origin, config.location.name.clone())
        }
        _ => bail!("Provide both --lat and --lon, or neither"),
    };

    let bearing = qibla_bearing(origin)?;

    println!();
    println_colored!(GOLD, "  Qibla from {}", label);
    println_colored!(
        BOLD,
        "  {:.1}° from true north ({})",
        bearing,
        compass_point(bearing)
    );
    println!();
    Ok(())
}

// ─── Tasbih ──────────────────────────────────────────────────────────────────

pub fn handle_tasbih(
    store: &mut dyn KeyValueStore,
    pack: &ContentPack,
    action: &TasbihCommands,
) -> Result<()> {
    let settings = UserSettings::load(store)?;
    let tasbih = TasbihState::load_or_seed(store, pack.azkar.clone())?;
    let mut state = AppState::new(settings, tasbih);
    dispatch(&mut state, AppEvent::PageSelected(Page::Tasbih));

    let event = match action {
        TasbihCommands::Show => None,
        TasbihCommands::Tap { count } => Some(AppEvent::TasbihTapped { count: *count }),
        TasbihCommands::Reset => Some(AppEvent::TasbihReset),
        TasbihCommands::Next => Some(AppEvent::DhikrAdvanced),
        TasbihCommands::Target { target } => Some(AppEvent::TasbihTargetSet(*target)),
    };

    if let Some(event) = event {
        let effects = dispatch(&mut state, event);
        apply_effects(&state, store, effects)?;
    }

    let phrase = state.tasbih.current_phrase();
    println!();
    println_colored!(GOLD, "  {}", phrase.text);
    println_colored!(
        BOLD,
        "  {} / {}  {}",
        state.tasbih.count,
        phrase.target,
        progress_bar(state.tasbih.count, phrase.target, 20)
    );
    println!();
    Ok(())
}

// ─── Content pages ───────────────────────────────────────────────────────────

fn print_hadith(hadith: &crate::models::Hadith) {
    println_colored!(GOLD, "  {}. {}", hadith.number, hadith.title);
    println!("  {}", hadith.text);
    let grade = hadith.grade.as_deref().unwrap_or("-");
    println_colored!(DIM, "  {} | {} | {}", hadith.narrator, hadith.source, grade);
    println!();
}

pub fn handle_hadith(pack: &ContentPack, search: Option<&str>, daily: bool) -> Result<()> {
    println!();
    if daily {
        let ordinal = Local::now().date_naive().ordinal();
        match pack.hadith_of_the_day(ordinal) {
            Some(hadith) => print_hadith(hadith),
            None => print_notice(&Notice::warning("The content pack has no hadiths")),
        }
        return Ok(());
    }

    let hadiths = pack.search_hadiths(search.unwrap_or(""));
    if hadiths.is_empty() {
        println_colored!(DIM, "  No hadiths match");
        println!();
        return Ok(());
    }
    for hadith in hadiths {
        print_hadith(hadith);
    }
    Ok(())
}

pub fn handle_recipes(pack: &ContentPack, category: Option<&str>, id: Option<u32>) -> Result<()> {
    println!();
    if let Some(id) = id {
        match pack.recipe_by_id(id) {
            Some(recipe) => print_recipe(recipe),
            None => println_colored!(DIM, "  No recipe with id {}", id),
        }
        return Ok(());
    }

    let recipes = pack.recipes_in_category(category);
    if recipes.is_empty() {
        println_colored!(DIM, "  No recipes in this category");
        println_colored!(
            DIM,
            "  Categories: {}",
            pack.recipe_categories().join(", ")
        );
        println!();
        return Ok(());
    }

    for recipe in recipes {
        print_recipe(recipe);
    }
    Ok(())
}

fn print_recipe(recipe: &crate::models::Recipe) {
    println_colored!(GOLD, "  {} (#{})", recipe.name, recipe.id);
    let time = recipe
        .time
        .map(|t| format!(" — {} min", t))
        .unwrap_or_default();
    println_colored!(DIM, "  {}{}", recipe.category, time);
    println!("  {}", recipe.description);
    for ingredient in &recipe.ingredients {
        println!("    • {}", ingredient);
    }
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("    {}. {}", i + 1, step);
    }
    println!();
}

pub fn handle_duas(pack: &ContentPack) -> Result<()> {
    println!();
    for dua in &pack.duas {
        println_colored!(GOLD, "  {}", dua.title);
        println_colored!(DIM, "  {}", dua.category);
        println!("  {}", dua.text);
        if let Some(reference) = &dua.reference {
            println_colored!(DIM, "  {}", reference);
        }
        println!();
    }
    Ok(())
}

pub fn handle_imsakia(pack: &ContentPack, all: bool) -> Result<()> {
    let today_str = Local::now().date_naive().format("%Y-%m-%d").to_string();

    println!();
    if all {
        println_colored!(
            GOLD,
            "  {}  {}  {}  {}  {}",
            pad_display("Day", 4),
            pad_display("Date", 11),
            pad_display("Suhoor", 7),
            pad_display("Fajr", 6),
            "Iftar"
        );
        for row in &pack.imsakia {
            let line = format!(
                "  {}  {}  {}  {}  {}",
                pad_display(&row.day.to_string(), 4),
                pad_display(&row.date, 11),
                pad_display(&row.suhoor, 7),
                pad_display(&row.fajr, 6),
                row.iftar
            );
            if row.date == today_str {
                println_colored!(BOLD, "{} ←", line);
            } else {
                println!("{}", line);
            }
        }
        println!();
        return Ok(());
    }

    match pack.imsakia.iter().find(|d| d.date == today_str) {
        Some(row) => {
            println_colored!(GOLD, "  Imsakia — day {}", row.day);
            println!("  Suhoor until {}", row.suhoor);
            println!("  Fajr at     {}", row.fajr);
            println!("  Iftar at    {}", row.iftar);
        }
        None => println_colored!(DIM, "  No imsakia entry for today — try --all"),
    }
    println!();
    Ok(())
}

pub fn handle_athan(pack: &ContentPack, store: &dyn KeyValueStore) -> Result<()> {
    let settings = UserSettings::load(store)?;
    println!();
    match pack.athan_recording(settings.athan_voice) {
        Some(url) => {
            println_colored!(GOLD, "  Athan recording {}", settings.athan_voice);
            println!("  {}", url);
        }
        None => print_notice(&Notice::warning(format!(
            "No athan recording at index {} — the pack has {}",
            settings.athan_voice,
            pack.videos.len()
        ))),
    }
    println!();
    Ok(())
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_settings(
    store: &mut dyn KeyValueStore,
    action: Option<&SettingsCommands>,
) -> Result<()> {
    let settings = UserSettings::load(store)?;
    let tasbih = TasbihState::load(store)?;
    let mut state = AppState::new(settings, tasbih);
    dispatch(&mut state, AppEvent::PageSelected(Page::Settings));

    if let Some(SettingsCommands::Set {
        calendar,
        dark_mode,
        font_size,
        prayer_notifications,
        imsakia_notifications,
        reminder_lead,
        athan_voice,
        grace,
    }) = action
    {
        let mut events: Vec<AppEvent> = Vec::new();
        if let Some(calendar) = calendar {
            events.push(AppEvent::CalendarTypeSet(CalendarType::from_str(calendar)?));
        }
        if let Some(on) = dark_mode {
            events.push(AppEvent::DarkModeSet(*on));
        }
        if let Some(size) = font_size {
            events.push(AppEvent::FontSizeSet(FontSize::from_str(size)?));
        }
        if let Some(on) = prayer_notifications {
            events.push(AppEvent::PrayerNotificationsSet(*on));
        }
        if let Some(on) = imsakia_notifications {
            events.push(AppEvent::ImsakiaNotificationsSet(*on));
        }
        if let Some(minutes) = reminder_lead {
            events.push(AppEvent::ReminderLeadSet(*minutes));
        }
        if let Some(index) = athan_voice {
            events.push(AppEvent::AthanVoiceSet(*index));
        }
        if let Some(minutes) = grace {
            events.push(AppEvent::GraceMinutesSet(*minutes));
        }

        if events.is_empty() {
            println_colored!(DIM, "  Nothing to change — see `rafiq settings set --help`");
            return Ok(());
        }
        for event in events {
            let effects = dispatch(&mut state, event);
            apply_effects(&state, store, effects)?;
        }
        println_colored!(GREEN, "  ✓ Settings updated");
    }

    let s = &state.settings;
    println!();
    println_colored!(GOLD, "  Settings");
    println!("    calendar               {}", s.calendar_type.as_str());
    println!("    dark-mode              {}", s.dark_mode);
    println!("    font-size              {}", s.font_size.as_str());
    println!("    prayer-notifications   {}", s.prayer_notifications);
    println!("    imsakia-notifications  {}", s.imsakia_notifications);
    println!("    reminder-lead          {} min", s.reminder_lead_minutes);
    println!("    athan-voice            {}", s.athan_voice);
    println!("    grace                  {} min", s.grace_minutes);
    println!();
    Ok(())
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

pub fn handle_export(store: &dyn KeyValueStore) -> Result<()> {
    let settings = UserSettings::load(store)?;
    let tasbih = TasbihState::load(store)?;
    println!("{}", export_snapshot(&settings, &tasbih)?);
    Ok(())
}

pub fn handle_import(store: &mut dyn KeyValueStore, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file).with_context(|| format!("Reading {:?}", file))?;
    let snapshot = import_snapshot(&raw)?;
    snapshot.settings.save(store)?;
    snapshot.tasbih.save(store)?;
    println_colored!(GREEN, "  ✓ Snapshot restored from {:?}", file);
    Ok(())
}

pub fn handle_clear(store: &mut dyn KeyValueStore, yes: bool) -> Result<()> {
    if !yes {
        print!("This clears all locally stored data. Continue? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println_colored!(DIM, "  Aborted");
            return Ok(());
        }
    }

    let settings = UserSettings::load(store)?;
    let tasbih = TasbihState::load(store)?;
    let mut state = AppState::new(settings, tasbih);
    let effects = dispatch(&mut state, AppEvent::DataCleared);
    apply_effects(&state, store, effects)?;
    Ok(())
}
