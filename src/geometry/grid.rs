use std::num::NonZeroU32;

use egui::Pos2;

pub const DEFAULT_GRID_SIZE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

/// Round each coordinate to the nearest multiple of `grid_size`
pub fn snap_to_grid(position: Pos2, grid_size: NonZeroU32) -> Pos2 {
    let grid = grid_size.get() as f32;
    Pos2::new((position.x / grid).round() * grid, (position.y / grid).round() * grid)
}

/// Snap `position` when `enabled`; otherwise return it unchanged
pub fn apply_snapping(position: Pos2, enabled: bool, grid_size: NonZeroU32) -> Pos2 {
    if enabled {
        snap_to_grid(position, grid_size)
    } else {
        position
    }
}
