use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::UserSettings;
use crate::tasbih::TasbihState;

/// Everything a user can carry between installs: their settings and the
/// tasbih state. Pure serialize/deserialize; reading and writing the
/// actual file is the caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub settings: UserSettings,
    pub tasbih: TasbihState,
}

pub fn export_snapshot(settings: &UserSettings, tasbih: &TasbihState) -> Result<String> {
    let snapshot = Snapshot {
        settings: settings.clone(),
        tasbih: tasbih.clone(),
    };
    serde_json::to_string_pretty(&snapshot).context("Serializing snapshot")
}

pub fn import_snapshot(json: &str) -> Result<Snapshot> {
    let mut snapshot: Snapshot =
        serde_json::from_str(json).context("Parsing snapshot")?;
    snapshot.tasbih.normalize();
    Ok(snapshot)
}
