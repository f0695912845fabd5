use egui::Pos2;

use super::resize::ResizeHandle;
use super::rotation::rot2;
use super::viewport::Viewport;
use crate::element::{distance_to_line_segment, Element, ElementKind, ShapeKind, LINE_HIT_SLOP};
use crate::template::Template;

/// Screen-space radius within which a pointer grabs a resize handle
pub const RESIZE_HANDLE_RADIUS: f32 = 8.0;

/// Map a template point into the element's unrotated frame
pub fn to_local(element: &Element, point: Pos2) -> Pos2 {
    let center = element.center();
    center + rot2(element.rotation()).inverse() * (point - center)
}

/// Map a point in the element's unrotated frame back into template space
pub fn to_world(element: &Element, local: Pos2) -> Pos2 {
    let center = element.center();
    center + rot2(element.rotation()) * (local - center)
}

fn is_line(element: &Element) -> bool {
    matches!(&element.kind, ElementKind::Shape(style) if style.shape == ShapeKind::Line)
}

/// Whether `point` (template units) lies on the element, honouring its rotation.
///
/// Lines are hit within [`LINE_HIT_SLOP`] of their horizontal midline; everything
/// else uses its full bounding box.
pub fn element_contains(element: &Element, point: Pos2) -> bool {
    let local = to_local(element, point);
    let rect = element.rect();
    if is_line(element) {
        distance_to_line_segment(local, rect.left_center(), rect.right_center()) <= LINE_HIT_SLOP
    } else {
        rect.contains(local)
    }
}

/// The element painted on top at `point`, if any
pub fn topmost_element_at(template: &Template, point: Pos2) -> Option<&Element> {
    template
        .paint_order()
        .into_iter()
        .rev()
        .find(|element| element_contains(element, point))
}

/// Screen positions of the eight resize handles of `element`
pub fn handle_positions(element: &Element, viewport: &Viewport) -> [(ResizeHandle, Pos2); 8] {
    let rect = element.rect();
    ResizeHandle::ALL.map(|handle| {
        let world = to_world(element, handle.anchor(rect));
        (handle, viewport.to_screen(world))
    })
}

/// The handle of `element` under the screen point `screen`, closest first
pub fn handle_at(element: &Element, screen: Pos2, viewport: &Viewport) -> Option<ResizeHandle> {
    handle_positions(element, viewport)
        .into_iter()
        .map(|(handle, pos)| (handle, pos.distance(screen)))
        .filter(|(_, distance)| *distance <= RESIZE_HANDLE_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(handle, _)| handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory::{create_shape_element, create_text_element};
    use crate::template::create_empty_template;
    use egui::Vec2;

    #[test]
    fn rotated_element_containment() {
        // 200x50 text box centred at (200, 125)
        let mut element = create_text_element("t", Pos2::new(100.0, 100.0), None);
        assert!(element_contains(&element, Pos2::new(290.0, 125.0)));

        element.set_rotation(90.0);
        // now tall and thin around the same centre
        assert!(!element_contains(&element, Pos2::new(290.0, 125.0)));
        assert!(element_contains(&element, Pos2::new(200.0, 210.0)));
    }

    #[test]
    fn topmost_respects_paint_order() {
        let mut template = create_empty_template("t", "Badge");
        let mut top = create_shape_element("top", Pos2::new(0.0, 0.0), None);
        top.z_index = 3;
        template.elements.push(top);
        template.elements.push(create_shape_element("bottom", Pos2::new(50.0, 50.0), None));
        template.elements.push(create_shape_element("later", Pos2::new(150.0, 150.0), None));

        assert_eq!(topmost_element_at(&template, Pos2::new(60.0, 60.0)).map(|e| e.id()), Some("top"));
        assert_eq!(topmost_element_at(&template, Pos2::new(140.0, 140.0)).map(|e| e.id()), Some("bottom"));
        assert!(topmost_element_at(&template, Pos2::new(400.0, 400.0)).is_none());
    }

    #[test]
    fn lines_hit_near_midline_only() {
        let mut element = create_shape_element("l", Pos2::new(0.0, 0.0), Some(ShapeKind::Line));
        element.size = crate::element::Size::new(100.0, 100.0);
        assert!(element_contains(&element, Pos2::new(50.0, 53.0)));
        assert!(!element_contains(&element, Pos2::new(50.0, 20.0)));
    }

    #[test]
    fn line_slop_is_measured_in_template_units() {
        let mut element = create_shape_element("l", Pos2::new(0.0, 0.0), Some(ShapeKind::Line));
        element.size = crate::element::Size::new(100.0, 100.0);
        assert!(element_contains(&element, Pos2::new(50.0, 50.0 + LINE_HIT_SLOP)));
        assert!(element_contains(&element, Pos2::new(50.0, 50.0 - LINE_HIT_SLOP)));
        assert!(!element_contains(&element, Pos2::new(50.0, 50.0 + LINE_HIT_SLOP + 0.5)));
    }

    #[test]
    fn handles_follow_zoom_and_pan() {
        let element = create_shape_element("s", Pos2::new(10.0, 10.0), None);
        let viewport = Viewport {
            origin: Pos2::new(100.0, 100.0),
            pan: Vec2::new(5.0, 0.0),
            zoom: 2.0,
        };
        let positions = handle_positions(&element, &viewport);
        assert_eq!(positions[0], (ResizeHandle::TopLeft, Pos2::new(125.0, 120.0)));

        let bottom_right = viewport.to_screen(Pos2::new(110.0, 110.0));
        assert_eq!(handle_at(&element, bottom_right + Vec2::new(3.0, 3.0), &viewport), Some(ResizeHandle::BottomRight));
        assert_eq!(handle_at(&element, Pos2::new(0.0, 0.0), &viewport), None);
    }
}
