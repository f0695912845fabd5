use egui::{Pos2, Rect, Vec2};

/// Mapping between template units and screen points.
///
/// `origin` is the screen position of the template's top-left corner at zero pan,
/// `pan` is the session pan offset in screen points and `zoom` is the scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Pos2,
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// Screen margin kept around a template that is larger than the canvas area
const CANVAS_MARGIN: f32 = 40.0;

impl Viewport {
    /// Centre a `template_size` template inside `area`, falling back to a fixed
    /// margin along any axis where the scaled template does not fit.
    pub fn centered(area: Rect, template_size: Vec2, zoom: f32, pan: Vec2) -> Self {
        let scaled = template_size * zoom;
        let offset_x = if scaled.x < area.width() {
            (area.width() - scaled.x) / 2.0
        } else {
            CANVAS_MARGIN
        };
        let offset_y = if scaled.y < area.height() {
            (area.height() - scaled.y) / 2.0
        } else {
            CANVAS_MARGIN
        };
        Self {
            origin: area.min + Vec2::new(offset_x, offset_y),
            pan,
            zoom,
        }
    }

    /// Convert a screen point into template coordinates
    pub fn to_template(&self, screen: Pos2) -> Pos2 {
        ((screen - self.origin - self.pan) / self.zoom).to_pos2()
    }

    /// Convert a template point into screen coordinates
    pub fn to_screen(&self, template: Pos2) -> Pos2 {
        self.origin + self.pan + template.to_vec2() * self.zoom
    }

    /// Convert a screen-space distance into template units
    pub fn screen_delta_to_template(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_between_spaces() {
        let viewport = Viewport {
            origin: Pos2::new(50.0, 30.0),
            pan: Vec2::new(10.0, -5.0),
            zoom: 2.0,
        };
        let template = Pos2::new(100.0, 40.0);
        let screen = viewport.to_screen(template);
        assert_eq!(screen, Pos2::new(260.0, 105.0));
        assert_eq!(viewport.to_template(screen), template);
    }

    #[test]
    fn screen_deltas_scale_by_zoom() {
        let viewport = Viewport {
            zoom: 0.5,
            ..Viewport::default()
        };
        assert_eq!(viewport.screen_delta_to_template(Vec2::new(10.0, 20.0)), Vec2::new(20.0, 40.0));
    }

    #[test]
    fn centers_small_templates_and_margins_large_ones() {
        let area = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(1000.0, 500.0));
        let small = Viewport::centered(area, Vec2::new(400.0, 300.0), 1.0, Vec2::ZERO);
        assert_eq!(small.origin, Pos2::new(300.0, 100.0));

        let large = Viewport::centered(area, Vec2::new(400.0, 300.0), 2.0, Vec2::ZERO);
        assert_eq!(large.origin, Pos2::new(100.0, CANVAS_MARGIN));
    }
}
