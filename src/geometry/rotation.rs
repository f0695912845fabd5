use egui::emath::Rot2;

/// Increment used by the rotate action buttons
pub const ROTATION_STEP: f32 = 15.0;

/// Map any angle in degrees onto the canonical range `[0, 360)`
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Express a canonical angle in `(-180, 180]` for slider display
pub fn to_signed_degrees(degrees: f32) -> f32 {
    let normalized = normalize_degrees(degrees);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Clockwise (screen space, y down) rotation by `degrees`
pub fn rot2(degrees: f32) -> Rot2 {
    Rot2::from_angle(degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_into_canonical_range() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(375.0), 15.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-720.0), 0.0);
        assert_eq!(normalize_degrees(f32::NAN), 0.0);
        let tiny = normalize_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn signed_view_is_half_open() {
        assert_eq!(to_signed_degrees(270.0), -90.0);
        assert_eq!(to_signed_degrees(180.0), 180.0);
        assert_eq!(to_signed_degrees(-45.0), -45.0);
    }

    #[test]
    fn positive_rotation_is_clockwise_on_screen() {
        // +x rotated by 90° clockwise with y pointing down lands on +y
        let v = rot2(90.0) * egui::vec2(1.0, 0.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 1.0).abs() < 1e-5);
    }
}
