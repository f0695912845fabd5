use egui::{Color32, Painter, Pos2, Stroke, Ui};

use crate::element::Element;
use crate::geometry::hit_testing::{handle_at, handle_positions};
use crate::geometry::resize::ResizeHandle;
use crate::geometry::viewport::Viewport;

/// Drawn size of a handle square, in screen points
pub const HANDLE_SIZE: f32 = 8.0;

const HANDLE_FILL: Color32 = Color32::WHITE;
const HANDLE_STROKE: Color32 = Color32::from_rgb(59, 130, 246);
const HANDLE_HOVER_FILL: Color32 = Color32::from_rgb(191, 219, 254);

/// The eight resize handles of the selected element
pub struct ResizeHandles<'a> {
    element: &'a Element,
    viewport: &'a Viewport,
}

impl<'a> ResizeHandles<'a> {
    pub fn new(element: &'a Element, viewport: &'a Viewport) -> Self {
        Self { element, viewport }
    }

    /// The handle under `pointer`, if any
    pub fn hovered(&self, pointer: Option<Pos2>) -> Option<ResizeHandle> {
        handle_at(self.element, pointer?, self.viewport)
    }

    /// Paint all handles and set the resize cursor when hovering one
    pub fn show(&self, ui: &Ui, painter: &Painter) -> Option<ResizeHandle> {
        let pointer = ui.ctx().pointer_hover_pos();
        let hovered = self.hovered(pointer);

        for (handle, position) in handle_positions(self.element, self.viewport) {
            Self::draw_handle(painter, position, hovered == Some(handle));
        }

        if let Some(handle) = hovered {
            ui.ctx().set_cursor_icon(handle.cursor_icon());
        }
        hovered
    }

    /// Draw a single handle square centred on `position`
    pub fn draw_handle(painter: &Painter, position: Pos2, hovered: bool) {
        let rect = egui::Rect::from_center_size(position, egui::Vec2::splat(HANDLE_SIZE));
        let fill = if hovered { HANDLE_HOVER_FILL } else { HANDLE_FILL };
        painter.rect_filled(rect, 2.0, fill);
        painter.rect_stroke(rect, 2.0, Stroke::new(1.0, HANDLE_STROKE));
    }
}
