use crate::domain::{GroupKey, SortDirection, SortKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between background rescans of the vault
    pub poll_interval_secs: u64,
    /// Folder (relative to the vault) holding `YYYY-MM-DD.md` daily notes
    pub daily_note_folder: String,
    /// Folders (relative to the vault) never scanned for tasks
    pub exclude_folders: Vec<String>,
    pub default_sort: SortKey,
    /// Falls back to the sort key's natural direction when unset
    pub default_direction: Option<SortDirection>,
    pub default_group: GroupKey,
    pub use_emoji: bool,
    /// Also raise desktop notifications (macOS only)
    pub desktop_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            daily_note_folder: "Daily".to_string(),
            exclude_folders: Vec::new(),
            default_sort: SortKey::Default,
            default_direction: None,
            default_group: GroupKey::None,
            use_emoji: true,
            desktop_notifications: false,
        }
    }
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.default_direction
            .unwrap_or_else(|| self.default_sort.natural_direction())
    }
}

/// Load settings from settings.json, defaults when the file is missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
