use egui::Pos2;

use super::Size;

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 20.0;
pub const DEFAULT_Z_INDEX: u32 = 1;
pub const DEFAULT_OPACITY: f32 = 1.0;
pub const DIMMED_OPACITY: f32 = 0.5;

/// Offset applied to a duplicated element so the copy never sits exactly on the original
pub const DUPLICATE_OFFSET: f32 = 20.0;

pub const TEXT_SIZE: Size = Size::new(200.0, 50.0);
pub const IMAGE_SIZE: Size = Size::new(150.0, 150.0);
pub const SHAPE_SIZE: Size = Size::new(100.0, 100.0);

/// Distance in template units within which a thin element such as a line is hit
pub const LINE_HIT_SLOP: f32 = 6.0;

/// Clamp an opacity value into `0..=1`, mapping NaN to fully opaque
pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        DEFAULT_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Calculate distance from a point to a line segment (used for line hit testing)
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}
