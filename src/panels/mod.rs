pub mod layers;
pub mod properties;
pub mod sidebar;
pub mod toolbar;

pub use layers::{layer_rows, layers_panel, LayerRow};
pub use properties::properties_panel;
pub use sidebar::{library_presets, sidebar, LibraryPreset};
pub use toolbar::{toolbar, AppAction, ToolbarOutput};
