use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Persisted settings
// ---------------------------------------------------------------------------

/// Settings that survive restarts: where the exported files live and which
/// artist the deep-dive page focuses on.  Stored as JSON under the user
/// config directory; anything derived from the data itself is never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub focus_artist: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("data"),
            focus_artist: None,
        }
    }
}

impl AppConfig {
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wrapped-dash").join("config.json"))
    }

    /// Load persisted settings, falling back to defaults on any problem;
    /// a missing or malformed file must never keep the dashboard from
    /// starting.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                log::warn!("ignoring malformed config {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("cannot determine config directory")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("config saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let config = AppConfig {
            data_dir: PathBuf::from("/exports/spotify"),
            focus_artist: Some("BTS".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data_dir, config.data_dir);
        assert_eq!(back.focus_artist.as_deref(), Some("BTS"));
    }

    #[test]
    fn malformed_json_is_rejected_cleanly() {
        assert!(serde_json::from_str::<AppConfig>("{\"data_dir\": 3}").is_err());
    }
}
