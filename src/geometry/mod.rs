//! Pure geometry used by the editor: grid snapping, rotation, resize handles,
//! the template/screen viewport mapping and hit testing.

pub mod grid;
pub mod hit_testing;
pub mod resize;
pub mod rotation;
pub mod viewport;

pub use grid::{apply_snapping, snap_to_grid, DEFAULT_GRID_SIZE};
pub use resize::{resize_rect, resize_rotated, ResizeHandle};
pub use viewport::Viewport;
