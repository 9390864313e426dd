//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Download location
    pub download_location: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: dirs::download_dir().unwrap_or_else(|| PathBuf::from("./downloads")),
        }
    }
}

impl AppSettings {
    /// Load settings from the platform config dir, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist settings to the platform config dir.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = settings_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
    }
}

/// Path of the persisted settings file: `<config_dir>/tubegrab/settings.json`
fn settings_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("tubegrab").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_have_a_download_location() {
        let settings = AppSettings::default();
        assert!(!settings.download_location.as_os_str().is_empty());
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let settings = AppSettings {
            download_location: PathBuf::from("/tmp/videos"),
        };

        let json = serde_json::to_string(&settings).unwrap();
        let restored: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.download_location, settings.download_location);
    }
}
