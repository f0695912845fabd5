use std::num::NonZeroU32;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_HISTORY_LIMIT;
use crate::geometry::grid::DEFAULT_GRID_SIZE;
use crate::state::DEFAULT_ZOOM;

/// Environment variable that overrides [`EditorConfig::templates_dir`]
pub const TEMPLATES_DIR_ENV: &str = "TEMPLATE_EDITOR_DIR";

/// User preferences, persisted with the rest of the app through eframe storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Where the file store keeps one JSON file per template
    pub templates_dir: PathBuf,
    pub history_limit: usize,
    pub default_grid_size: u32,
    pub default_zoom: f32,
    pub show_grid: bool,
    pub snap_to_grid: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_grid_size: DEFAULT_GRID_SIZE.get(),
            default_zoom: DEFAULT_ZOOM,
            show_grid: true,
            snap_to_grid: false,
        }
    }
}

impl EditorConfig {
    /// Grid size as a non-zero value; a stored zero falls back to the default
    pub fn grid_size(&self) -> NonZeroU32 {
        NonZeroU32::new(self.default_grid_size).unwrap_or(DEFAULT_GRID_SIZE)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV) {
            self.templates_dir = PathBuf::from(dir);
            log::info!("📁 Templates directory overridden to {}", self.templates_dir.display());
        }
        self
    }
}
