use std::fs;
use std::path::PathBuf;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// The persisted settings blob: announcer provider preference, display name,
/// postal code. Besides the URL, this is the only state that survives a
/// reload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "type", default)]
    pub provider: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub zip: String,
}

/// Loads and saves the blob as JSON under the platform config directory.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "chorale", "chorale")
            .ok_or_else(|| eyre!("no home directory to store settings in"))?;
        Ok(Self {
            path: dirs.config_dir().join("settings.json"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing blob is first run, not an error: defaults load.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_blob_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn blob_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));
        let settings = Settings {
            provider: "polly".to_string(),
            name: "Sam".to_string(),
            zip: "90210".to_string(),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn blob_uses_the_wire_field_names() {
        let settings = Settings {
            provider: "polly".to_string(),
            name: "Sam".to_string(),
            zip: "90210".to_string(),
        };
        let raw = serde_json::to_string(&settings).unwrap();
        assert!(raw.contains("\"type\""));
        let parsed: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, settings);
    }
}
