use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;

use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings, writing defaults to disk when the file does not exist yet.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            log::info!("Wrote default settings to {}", self.path.display());
            return Ok(settings);
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Directory holding settings and the database.
fn data_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(".")
    }

    #[cfg(not(debug_assertions))]
    {
        ProjectDirs::from("com", "CoachScheduler", "CoachScheduler")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn default_settings_path() -> PathBuf {
    data_dir().join(SETTINGS_FILE)
}

/// Resolve a configured path against the data directory unless it is absolute
/// or the in-memory marker.
pub fn resolve_data_path(configured: &str) -> String {
    if configured == ":memory:" || Path::new(configured).is_absolute() {
        return configured.to_string();
    }
    data_dir().join(configured).to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let service = SettingsService::new(&path);

        let settings = service.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));

        let settings = Settings {
            day_columns: vec![0, 1, 2, 3, 4],
            slot_interval_minutes: 15,
            theme: "dark".to_string(),
            ..Settings::default()
        };
        service.save(&settings).unwrap();

        assert_eq!(service.load().unwrap(), settings);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "slot_interval_minutes = 60\n").unwrap();

        let settings = SettingsService::new(&path).load().unwrap();
        assert_eq!(settings.slot_interval_minutes, 60);
        assert_eq!(settings.day_start, "06:00");
    }

    #[test]
    fn invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "day_columns = [0, 8]\n").unwrap();

        let err = SettingsService::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    fn save_refuses_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));
        let settings = Settings {
            slot_interval_minutes: 0,
            ..Settings::default()
        };
        assert!(service.save(&settings).is_err());
    }

    #[test]
    fn memory_and_absolute_paths_are_kept() {
        assert_eq!(resolve_data_path(":memory:"), ":memory:");
        let absolute = std::env::temp_dir().join("schedule.db");
        let absolute = absolute.to_string_lossy().to_string();
        assert_eq!(resolve_data_path(&absolute), absolute);
    }
}
