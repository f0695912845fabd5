mod editor_state;

pub use editor_state::{EditorState, Mode, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
