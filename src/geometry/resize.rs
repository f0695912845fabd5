use egui::{CursorIcon, Pos2, Rect, Vec2};

use super::rotation::rot2;

/// One of the eight resize handles around a selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight)
    }

    fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight)
    }

    /// Where this handle sits on the (unrotated) rectangle
    pub fn anchor(self, rect: Rect) -> Pos2 {
        let x = if self.moves_left() {
            rect.min.x
        } else if self.moves_right() {
            rect.max.x
        } else {
            rect.center().x
        };
        let y = if self.moves_top() {
            rect.min.y
        } else if self.moves_bottom() {
            rect.max.y
        } else {
            rect.center().y
        };
        Pos2::new(x, y)
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => CursorIcon::ResizeNwSe,
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => CursorIcon::ResizeNeSw,
            ResizeHandle::Top | ResizeHandle::Bottom => CursorIcon::ResizeVertical,
            ResizeHandle::Left | ResizeHandle::Right => CursorIcon::ResizeHorizontal,
        }
    }
}

/// Resize `start` by dragging `handle` by `delta`, keeping the opposite edges fixed.
///
/// Each dimension is floored at `min_size`; when the floor is hit on a left/top edge
/// the edge stops at `opposite - min_size` instead of pushing the rectangle.
pub fn resize_rect(start: Rect, handle: ResizeHandle, delta: Vec2, min_size: f32) -> Rect {
    let mut rect = start;

    if handle.moves_right() {
        rect.max.x = start.min.x + (start.width() + delta.x).max(min_size);
    } else if handle.moves_left() {
        let width = (start.width() - delta.x).max(min_size);
        rect.min.x = start.max.x - width;
    }

    if handle.moves_bottom() {
        rect.max.y = start.min.y + (start.height() + delta.y).max(min_size);
    } else if handle.moves_top() {
        let height = (start.height() - delta.y).max(min_size);
        rect.min.y = start.max.y - height;
    }

    rect
}

/// Resize an element rotated by `rotation` degrees around its centre.
///
/// `world_delta` is the pointer movement in template units. It is mapped into the
/// element's local frame, the local rectangle is resized, and the result is shifted
/// so the fixed edge stays at the same place on screen.
pub fn resize_rotated(start: Rect, handle: ResizeHandle, world_delta: Vec2, rotation: f32, min_size: f32) -> Rect {
    let rot = rot2(rotation);
    let local_delta = rot.inverse() * world_delta;
    let resized = resize_rect(start, handle, local_delta, min_size);

    let center_shift = resized.center() - start.center();
    resized.translate(rot * center_shift - center_shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 20.0;

    fn start() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(200.0, 100.0))
    }

    #[test]
    fn corner_handles_move_two_edges() {
        let r = resize_rect(start(), ResizeHandle::BottomRight, Vec2::new(30.0, 10.0), MIN);
        assert_eq!(r.min, Pos2::new(100.0, 100.0));
        assert_eq!(r.size(), Vec2::new(230.0, 110.0));

        let r = resize_rect(start(), ResizeHandle::TopLeft, Vec2::new(30.0, 10.0), MIN);
        assert_eq!(r.max, Pos2::new(300.0, 200.0));
        assert_eq!(r.min, Pos2::new(130.0, 110.0));
    }

    #[test]
    fn edge_handles_move_one_edge() {
        let r = resize_rect(start(), ResizeHandle::Right, Vec2::new(50.0, 80.0), MIN);
        assert_eq!(r.size(), Vec2::new(250.0, 100.0));
        assert_eq!(r.min, start().min);

        let r = resize_rect(start(), ResizeHandle::Top, Vec2::new(50.0, -40.0), MIN);
        assert_eq!(r.min, Pos2::new(100.0, 60.0));
        assert_eq!(r.size(), Vec2::new(200.0, 140.0));
    }

    #[test]
    fn every_handle_respects_minimum_size() {
        for handle in ResizeHandle::ALL {
            for delta in [Vec2::new(-1000.0, -1000.0), Vec2::new(1000.0, 1000.0), Vec2::new(1000.0, -1000.0)] {
                let r = resize_rect(start(), handle, delta, MIN);
                assert!(r.width() >= MIN, "{handle:?} {delta:?} -> {r:?}");
                assert!(r.height() >= MIN, "{handle:?} {delta:?} -> {r:?}");
            }
        }
    }

    #[test]
    fn left_edge_stops_at_floor_without_moving_right_edge() {
        let r = resize_rect(start(), ResizeHandle::Left, Vec2::new(500.0, 0.0), MIN);
        assert_eq!(r.max.x, 300.0);
        assert_eq!(r.width(), MIN);
    }

    #[test]
    fn rotated_resize_without_rotation_matches_plain_resize() {
        let delta = Vec2::new(25.0, -15.0);
        for handle in ResizeHandle::ALL {
            let plain = resize_rect(start(), handle, delta, MIN);
            let rotated = resize_rotated(start(), handle, delta, 0.0, MIN);
            assert!((plain.min - rotated.min).length() < 1e-3);
            assert!((plain.max - rotated.max).length() < 1e-3);
        }
    }

    #[test]
    fn rotated_resize_keeps_opposite_corner_in_place() {
        let rotation = 90.0;
        let rot = rot2(rotation);
        let s = start();
        let world_of = |rect: Rect, local: Pos2| rect.center() + rot * (local - rect.center());

        let fixed_before = world_of(s, s.min);
        let r = resize_rotated(s, ResizeHandle::BottomRight, Vec2::new(-10.0, 40.0), rotation, MIN);
        let fixed_after = world_of(r, r.min);
        assert!((fixed_before - fixed_after).length() < 1e-3);
        // dragging down on a 90° rotated element grows its local width
        assert!((r.width() - 240.0).abs() < 1e-3);
    }

    #[test]
    fn anchors_sit_on_rect() {
        let s = start();
        assert_eq!(ResizeHandle::TopLeft.anchor(s), s.left_top());
        assert_eq!(ResizeHandle::Bottom.anchor(s), s.center_bottom());
        assert_eq!(ResizeHandle::Right.anchor(s), s.right_center());
    }
}
