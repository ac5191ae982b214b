mod cli;
mod config;
mod content;
mod events;
mod models;
mod prayer_times;
mod qibla;
mod storage;
mod tasbih;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use content::ContentPack;
use storage::SqliteStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open the store
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let mut store = SqliteStore::open(&db_path)?;

    let pack = match &config.content.path {
        Some(path) => ContentPack::load(path)?,
        None => ContentPack::bundled()?,
    };

    match cli.command {
        Commands::Setup {
            location,
            lat,
            lon,
            method,
            madhab,
            tz_offset,
            hijri_offset,
            list_methods,
        } => handlers::handle_setup(
            &mut config,
            location,
            lat,
            lon,
            method,
            madhab,
            tz_offset,
            hijri_offset,
            list_methods,
        ),
        Commands::Times { grace } => handlers::handle_times(&config, &store, &pack, grace),
        Commands::Qibla { lat, lon } => handlers::handle_qibla(&config, lat, lon),
        Commands::Tasbih { action } => handlers::handle_tasbih(&mut store, &pack, &action),
        Commands::Hadith { search, daily } => {
            handlers::handle_hadith(&pack, search.as_deref(), daily)
        }
        Commands::Recipes { category, id } => {
            handlers::handle_recipes(&pack, category.as_deref(), id)
        }
        Commands::Duas => handlers::handle_duas(&pack),
        Commands::Imsakia { all } => handlers::handle_imsakia(&pack, all),
        Commands::Athan => handlers::handle_athan(&pack, &store),
        Commands::Settings { action } => handlers::handle_settings(&mut store, action.as_ref()),
        Commands::Export => handlers::handle_export(&store),
        Commands::Import { file } => handlers::handle_import(&mut store, &file),
        Commands::Clear { yes } => handlers::handle_clear(&mut store, yes),
    }
}
