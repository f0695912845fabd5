//! Document-level editor state.
//!
//! `EditorState` holds only the facts that undo, redo and the panels care about: the
//! template, the selection, view settings and history. Transient pointer state lives in
//! [`crate::canvas::CanvasInteraction`] and never appears here.

use std::num::NonZeroU32;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::{reduce, Command, History, Snapshot};
use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use crate::geometry::grid::DEFAULT_GRID_SIZE;
use crate::template::Template;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;
pub const DEFAULT_ZOOM: f32 = 1.0;

/// What a click on the canvas does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Select,
    Text,
    Image,
    Shape,
    Pan,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Select, Mode::Text, Mode::Image, Mode::Shape, Mode::Pan];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Select => "Select",
            Mode::Text => "Text",
            Mode::Image => "Image",
            Mode::Shape => "Shape",
            Mode::Pan => "Pan",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Mode::Select => "⬉",
            Mode::Text => "T",
            Mode::Image => "🖼",
            Mode::Shape => "⬛",
            Mode::Pan => "✋",
        }
    }

    /// Modes in which a click on the canvas places a new element
    pub fn places_elements(self) -> bool {
        matches!(self, Mode::Text | Mode::Image | Mode::Shape)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub(crate) template: Option<Arc<Template>>,
    pub(crate) selected_element_id: Option<ElementId>,
    pub(crate) zoom: f32,
    pub(crate) show_grid: bool,
    pub(crate) snap_to_grid: bool,
    pub(crate) grid_size: NonZeroU32,
    pub(crate) mode: Mode,
    pub(crate) history: History,
    pub(crate) unsaved_changes: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            template: None,
            selected_element_id: None,
            zoom: DEFAULT_ZOOM,
            show_grid: true,
            snap_to_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            mode: Mode::Select,
            history: History::default(),
            unsaved_changes: false,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: History::with_limit(limit),
            ..Self::default()
        }
    }

    /// A session seeded from the user's configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            zoom: config.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            show_grid: config.show_grid,
            snap_to_grid: config.snap_to_grid,
            grid_size: config.grid_size(),
            history: History::with_limit(config.history_limit),
            ..Self::default()
        }
    }

    /// Run a command through the reducer in place
    pub fn dispatch(&mut self, command: Command) {
        let state = std::mem::take(self);
        *self = reduce(state, command);
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_deref()
    }

    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected_element_id.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selected_element_id.as_deref()?;
        self.template()?.element(id)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn grid_size(&self) -> NonZeroU32 {
        self.grid_size
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub(crate) fn template_mut(&mut self) -> Option<&mut Template> {
        self.template.as_mut().map(Arc::make_mut)
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            template: self.template.clone(),
            selected_element_id: self.selected_element_id.clone(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.template = snapshot.template;
        self.selected_element_id = snapshot.selected_element_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::create_empty_template;

    #[test]
    fn default_session_is_empty() {
        let state = EditorState::default();
        assert!(state.template().is_none());
        assert_eq!(state.zoom(), 1.0);
        assert_eq!(state.grid_size().get(), 20);
        assert_eq!(state.mode(), Mode::Select);
        assert!(!state.unsaved_changes());
    }

    #[test]
    fn snapshots_share_the_template() {
        let mut state = EditorState::new();
        state.dispatch(Command::LoadTemplate(create_empty_template("t", "Ticket")));
        let snapshot = state.snapshot();
        let (Some(a), Some(b)) = (&snapshot.template, &state.template) else {
            panic!("template missing");
        };
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn config_seeds_view_settings() {
        let config = EditorConfig {
            default_zoom: 9.0,
            snap_to_grid: true,
            history_limit: 10,
            ..EditorConfig::default()
        };
        let state = EditorState::from_config(&config);
        assert_eq!(state.zoom(), MAX_ZOOM);
        assert!(state.snap_to_grid());
        assert_eq!(state.history().limit(), 10);
    }
}
