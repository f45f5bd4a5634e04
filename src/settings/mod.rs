pub mod schema;

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use log::warn;
use thiserror::Error;

use schema::Settings;

const SAVE_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("writing settings to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("encoding settings")]
    Encode(#[from] serde_json::Error),
}

/// Owns the loaded settings and writes them back with a short debounce, so
/// that bursts of changes cost one disk write.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
    pending_write: bool,
    last_change_at: Option<Instant>,
    debounce: Duration,
}

impl SettingsStore {
    pub fn load() -> Self {
        Self::with_path(settings_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = load_settings_from(path.as_path());
        Self {
            path,
            settings,
            pending_write: false,
            last_change_at: None,
            debounce: Duration::from_millis(SAVE_DEBOUNCE_MS),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        self.pending_write = true;
        self.last_change_at = Some(Instant::now());
        &mut self.settings
    }

    pub fn update<F>(&mut self, mutator: F)
    where
        F: FnOnce(&mut Settings),
    {
        mutator(&mut self.settings);
        self.pending_write = true;
        self.last_change_at = Some(Instant::now());
    }

    pub fn flush_if_due(&mut self) -> Result<bool, SettingsError> {
        let Some(last_change) = self.last_change_at else {
            return Ok(false);
        };
        if !self.pending_write || last_change.elapsed() < self.debounce {
            return Ok(false);
        }

        save_settings_to(self.path.as_path(), &self.settings)?;
        self.pending_write = false;
        self.last_change_at = None;
        Ok(true)
    }

    pub fn force_flush(&mut self) -> Result<(), SettingsError> {
        if self.pending_write {
            save_settings_to(self.path.as_path(), &self.settings)?;
            self.pending_write = false;
            self.last_change_at = None;
        }
        Ok(())
    }
}

pub fn settings_path() -> PathBuf {
    if let Some(root) = portable_root() {
        return root.join("settings.json");
    }

    if let Some(base) = dirs::config_dir() {
        base.join("Waylink").join("settings.json")
    } else {
        PathBuf::from("settings.json")
    }
}

/// A `waylink.ini` marker next to the executable keeps all state in that
/// directory instead of the user profile.
pub fn portable_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?.to_path_buf();
    let marker = dir.join("waylink.ini");
    if marker.exists() { Some(dir) } else { None }
}

pub fn load_settings() -> Settings {
    load_settings_from(settings_path().as_path())
}

pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    save_settings_to(settings_path().as_path(), settings)
}

/// A missing or unreadable file yields the defaults; settings are never a
/// reason to fail startup.
pub fn load_settings_from(path: &Path) -> Settings {
    let Ok(data) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&data) {
        Ok(settings) => settings.migrate(),
        Err(err) => {
            warn!("settings file {} is corrupt: {err}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let data = serde_json::to_string_pretty(&settings.clone().migrate())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, data).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn settings_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::with_path(&path);
        store.update(|s| {
            s.zoom.increment = 25.0;
            s.remember_file_state("C:\\docs\\a.chm").page_no = 7;
        });
        store.force_flush().unwrap();

        let reloaded = SettingsStore::with_path(&path);
        assert_eq!(reloaded.settings().zoom.increment, 25.0);
        assert_eq!(
            reloaded.settings().file_state("C:\\docs\\a.chm").unwrap().page_no,
            7
        );
    }

    #[test]
    fn a_missing_or_corrupt_file_loads_the_defaults() {
        let dir = tempdir().unwrap();
        let missing = SettingsStore::with_path(dir.path().join("nope.json"));
        assert!(missing.settings().remember_state_per_document);

        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let corrupt = SettingsStore::with_path(&path);
        assert!(corrupt.settings().file_states.is_empty());
    }

    #[test]
    fn migration_runs_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"schema_version":0,"zoom":{"levels":[1.0,50.0],"increment":0.0}}"#,
        )
        .unwrap();

        let store = SettingsStore::with_path(&path);
        assert_eq!(store.settings().schema_version, schema::SETTINGS_SCHEMA_VERSION);
        assert_eq!(store.settings().zoom.levels, vec![50.0]);
    }

    #[test]
    fn flushing_waits_for_the_debounce() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = SettingsStore::with_path(&path);
        assert!(!store.flush_if_due().unwrap());

        store.update(|s| s.remember_state_per_document = false);
        assert!(!store.flush_if_due().unwrap());
        assert!(!path.exists());

        store.debounce = Duration::ZERO;
        assert!(store.flush_if_due().unwrap());
        assert!(path.exists());
        assert!(!store.flush_if_due().unwrap());
    }
}
