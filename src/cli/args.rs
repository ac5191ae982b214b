use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rafiq",
    version,
    about = "A terminal companion for Ramadan and daily worship",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure location, calculation method and madhab
    Setup {
        /// Display name for the location
        #[arg(long)]
        location: Option<String>,
        /// Latitude in degrees
        #[arg(long)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long)]
        lon: Option<f64>,
        /// Calculation method (see --list-methods)
        #[arg(long)]
        method: Option<String>,
        /// Madhab for Asr: Hanafi or Shafi
        #[arg(long)]
        madhab: Option<String>,
        /// Minutes from UTC for local times
        #[arg(long)]
        tz_offset: Option<i32>,
        /// Hijri day adjustment for local moon sighting
        #[arg(long)]
        hijri_offset: Option<i32>,
        /// List supported calculation methods and exit
        #[arg(long)]
        list_methods: bool,
    },
    /// Show today's prayer times, window statuses and next-prayer countdown
    Times {
        /// Override the configured grace window, in minutes
        #[arg(long)]
        grace: Option<u32>,
    },
    /// Show the qibla bearing from the configured location
    Qibla {
        /// Latitude override
        #[arg(long)]
        lat: Option<f64>,
        /// Longitude override
        #[arg(long)]
        lon: Option<f64>,
    },
    /// Tasbih counter
    Tasbih {
        #[command(subcommand)]
        action: TasbihCommands,
    },
    /// Browse hadiths
    Hadith {
        /// Filter by a substring of the title or text
        #[arg(long)]
        search: Option<String>,
        /// Show only today's hadith
        #[arg(long)]
        daily: bool,
    },
    /// Browse iftar and suhoor recipes
    Recipes {
        /// Filter by category (iftar, suhoor, dessert, ...)
        #[arg(long)]
        category: Option<String>,
        /// Show a single recipe by id
        #[arg(long)]
        id: Option<u32>,
    },
    /// Browse duas
    Duas,
    /// Ramadan imsakia — today's row, or the whole month
    Imsakia {
        /// Show the full table
        #[arg(long)]
        all: bool,
    },
    /// Print the configured athan recording
    Athan,
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommands>,
    },
    /// Print a JSON snapshot of settings and tasbih state
    Export,
    /// Restore a snapshot produced by `export`
    Import {
        /// Snapshot file
        file: PathBuf,
    },
    /// Clear all locally stored data
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasbihCommands {
    /// Show the current phrase, count and target
    Show,
    /// Count one (or more) recitations
    Tap {
        /// How many recitations to add
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// Reset the count for the current phrase
    Reset,
    /// Move to the next phrase in the cycle
    Next,
    /// Set the current phrase's target count
    Target { target: u32 },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show all settings
    Show,
    /// Update one or more settings
    Set {
        /// Calendar for date lines: hijri or gregorian
        #[arg(long)]
        calendar: Option<String>,
        /// Dark mode on/off
        #[arg(long)]
        dark_mode: Option<bool>,
        /// Font size: small, medium or large
        #[arg(long)]
        font_size: Option<String>,
        /// Prayer reminders on/off
        #[arg(long)]
        prayer_notifications: Option<bool>,
        /// Imsakia reminders on/off
        #[arg(long)]
        imsakia_notifications: Option<bool>,
        /// Minutes of warning before each prayer
        #[arg(long)]
        reminder_lead: Option<u32>,
        /// Index of the athan recording to use
        #[arg(long)]
        athan_voice: Option<usize>,
        /// Minutes a prayer stays "current" after its start
        #[arg(long)]
        grace: Option<u32>,
    },
}
