use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controller::DisplayMode;
use crate::geom::Point;
use crate::zoom::{DEFAULT_ZOOM_LEVELS, is_valid_zoom};

pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schema_version: u32,
    /// When off, documents reopen with the default view instead of where
    /// they were left.
    pub remember_state_per_document: bool,
    pub zoom: ZoomSettings,
    pub file_states: Vec<FileState>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            remember_state_per_document: true,
            zoom: ZoomSettings::default(),
            file_states: Vec::new(),
        }
    }
}

impl Settings {
    pub fn migrate(mut self) -> Self {
        if self.schema_version > SETTINGS_SCHEMA_VERSION {
            return self;
        }

        self.schema_version = SETTINGS_SCHEMA_VERSION;
        self.zoom.sanitize();
        self
    }

    /// The state entry for `path`, moved to the front of the list (most
    /// recently used first) and stamped with the current time. A new entry
    /// is created on first use.
    pub fn remember_file_state(&mut self, path: &str) -> &mut FileState {
        let pos = self
            .file_states
            .iter()
            .position(|fs| fs.file_path.eq_ignore_ascii_case(path));
        let state = match pos {
            Some(pos) => self.file_states.remove(pos),
            None => FileState {
                file_path: path.to_string(),
                ..FileState::default()
            },
        };
        self.file_states.insert(0, state);
        let state = &mut self.file_states[0];
        state.last_opened = Some(Utc::now());
        state
    }

    pub fn file_state(&self, path: &str) -> Option<&FileState> {
        self.file_states
            .iter()
            .find(|fs| fs.file_path.eq_ignore_ascii_case(path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Stops for zoom-in/zoom-out stepping, in ascending order.
    pub levels: Vec<f32>,
    /// Fixed step in percent of the current zoom; 0 uses `levels` instead.
    pub increment: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            increment: 0.0,
        }
    }
}

impl ZoomSettings {
    /// Drops out-of-range levels and restores order; an empty list falls
    /// back to the built-in stops.
    pub fn sanitize(&mut self) {
        self.levels.retain(|&z| is_valid_zoom(z));
        self.levels.sort_by(f32::total_cmp);
        if self.levels.is_empty() {
            self.levels = DEFAULT_ZOOM_LEVELS.to_vec();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileState {
    pub file_path: String,
    pub display_mode: DisplayMode,
    pub page_no: i32,
    pub zoom: f32,
    pub scroll_pos: Point,
    /// Set when the state was captured with per-document memory off; such
    /// an entry only keeps the file in the history.
    pub use_default_state: bool,
    pub last_opened: Option<DateTime<Utc>>,
}

impl Default for FileState {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            display_mode: DisplayMode::default(),
            page_no: 1,
            zoom: 100.0,
            scroll_pos: Point::default(),
            use_default_state: false,
            last_opened: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_stamps_the_schema_version() {
        let settings = Settings {
            schema_version: 0,
            ..Settings::default()
        };
        assert_eq!(settings.migrate().schema_version, SETTINGS_SCHEMA_VERSION);
    }

    #[test]
    fn migrate_keeps_newer_settings_untouched() {
        let settings = Settings {
            schema_version: SETTINGS_SCHEMA_VERSION + 1,
            zoom: ZoomSettings {
                levels: vec![700000.0],
                increment: 0.0,
            },
            ..Settings::default()
        };
        let migrated = settings.migrate();
        assert_eq!(migrated.schema_version, SETTINGS_SCHEMA_VERSION + 1);
        assert_eq!(migrated.zoom.levels, vec![700000.0]);
    }

    #[test]
    fn zoom_levels_are_sanitized_on_migrate() {
        let settings = Settings {
            zoom: ZoomSettings {
                levels: vec![400.0, 1.0, 50.0, 100000.0, 100.0],
                increment: 0.0,
            },
            ..Settings::default()
        };
        let migrated = settings.migrate();
        assert_eq!(migrated.zoom.levels, vec![50.0, 100.0, 400.0]);
    }

    #[test]
    fn an_empty_zoom_table_falls_back_to_the_defaults() {
        let mut zoom = ZoomSettings {
            levels: vec![-5.0],
            increment: 20.0,
        };
        zoom.sanitize();
        assert_eq!(zoom.levels, DEFAULT_ZOOM_LEVELS.to_vec());
        assert_eq!(zoom.increment, 20.0);
    }

    #[test]
    fn remembering_a_file_moves_it_to_the_front() {
        let mut settings = Settings::default();
        settings.remember_file_state("C:\\docs\\a.chm").page_no = 4;
        settings.remember_file_state("C:\\docs\\b.chm");
        assert_eq!(settings.file_states[0].file_path, "C:\\docs\\b.chm");

        // paths match case-insensitively and keep their original spelling
        let state = settings.remember_file_state("c:\\DOCS\\A.CHM");
        assert_eq!(state.page_no, 4);
        assert!(state.last_opened.is_some());
        assert_eq!(settings.file_states[0].file_path, "C:\\docs\\a.chm");
        assert_eq!(settings.file_states.len(), 2);
    }

    #[test]
    fn file_state_lookup_ignores_case() {
        let mut settings = Settings::default();
        settings.remember_file_state("C:\\docs\\a.chm").zoom = 150.0;
        assert_eq!(settings.file_state("c:\\docs\\A.chm").unwrap().zoom, 150.0);
        assert!(settings.file_state("c:\\docs\\b.chm").is_none());
    }
}
