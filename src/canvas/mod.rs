//! The canvas: renders the template and turns pointer input into commands.

pub mod interaction;
pub mod render;
pub mod upload;

use egui::{Color32, CursorIcon, Id, Order, Pos2, Rect, Sense, Ui, Vec2};

pub use interaction::{CanvasInteraction, FloatingAction, Gesture, TextEdit};
pub use upload::{CompletedUpload, UploadQueue};

use crate::command::Command;
use crate::geometry::viewport::Viewport;
use crate::input::InputHandler;
use crate::state::{EditorState, Mode};
use crate::texture_manager::TextureManager;
use crate::widgets::resize_handle::ResizeHandles;
use render::ElementPainter;

const CANVAS_BACKDROP: Color32 = Color32::from_gray(236);
const FLOATING_ACTIONS_GAP: f32 = 36.0;

/// What the canvas produced this frame
#[derive(Debug, Default)]
pub struct CanvasOutput {
    pub commands: Vec<Command>,
    /// Human readable failures, e.g. an image that could not be read
    pub errors: Vec<String>,
}

/// Owns everything session-scoped about the canvas
#[derive(Default)]
pub struct Canvas {
    pub interaction: CanvasInteraction,
    input: InputHandler,
    pub textures: TextureManager,
    pub uploads: UploadQueue,
    /// Screen rect of the canvas area in the last frame
    area: Option<Rect>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template coordinates at the centre of the visible canvas area
    pub fn visible_center(&self, state: &EditorState) -> Pos2 {
        let (Some(area), Some(template)) = (self.area, state.template()) else {
            return Pos2::ZERO;
        };
        let viewport = Viewport::centered(area, template.layout.size(), state.zoom(), self.interaction.pan);
        viewport.to_template(area.center())
    }

    /// Forget transient state after the document is replaced
    pub fn reset(&mut self) {
        self.interaction.reset();
        self.textures.clear_cache();
    }

    pub fn show(&mut self, ui: &mut Ui, state: &EditorState) -> CanvasOutput {
        let mut output = CanvasOutput::default();
        self.textures.begin_frame();

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let area = response.rect;
        self.area = Some(area);
        let painter = painter.with_clip_rect(area);
        painter.rect_filled(area, 0.0, CANVAS_BACKDROP);

        let Some(template) = state.template() else {
            painter.text(
                area.center(),
                egui::Align2::CENTER_CENTER,
                "No template loaded. Create or open one from the toolbar.",
                egui::FontId::proportional(16.0),
                Color32::from_gray(120),
            );
            return output;
        };

        let viewport = Viewport::centered(area, template.layout.size(), state.zoom(), self.interaction.pan);
        let template_rect = viewport.rect_to_screen(Rect::from_min_size(Pos2::ZERO, template.layout.size()));
        let ctx = ui.ctx().clone();

        painter.rect_filled(template_rect.translate(Vec2::splat(3.0)), 0.0, Color32::from_black_alpha(30));
        render::paint_background(&painter, template_rect, &template.layout.background, &mut self.textures, &ctx);
        if state.show_grid() && !self.interaction.preview {
            render::paint_grid(&painter, template_rect, state.grid_size().get() as f32, viewport.zoom);
        }

        let elements = ElementPainter {
            painter: &painter,
            viewport: &viewport,
            ctx: &ctx,
        };
        elements.paint_template(template, &mut self.textures);

        if !self.interaction.preview {
            if let Some(hovered) = self.interaction.hovered().and_then(|id| template.element(id)) {
                if state.selected_element_id() != Some(hovered.id()) {
                    elements.paint_hover_outline(hovered);
                }
            }
            if let Some(selected) = state.selected_element() {
                elements.paint_selection_outline(selected);
                ResizeHandles::new(selected, &viewport).show(ui, &painter);
            }
        }

        for event in self.input.process_response(&response, &ctx) {
            output
                .commands
                .extend(self.interaction.handle_event(&event, state, &viewport));
        }
        self.update_cursor(&response, state);

        if let Some(position) = self.interaction.take_image_request() {
            self.uploads.request_picker(position, &ctx);
        }
        if !self.interaction.preview {
            let drop_position = viewport.to_template(area.center());
            self.uploads.accept_dropped_files(&ctx, drop_position);
        }
        for upload in self.uploads.drain() {
            let source = upload.source.clone();
            match upload.into_command() {
                Ok(command) => output.commands.push(command),
                Err(err) => {
                    log::error!("Failed to add image {source}: {err}");
                    output.errors.push(format!("Could not add image {source}: {err}"));
                }
            }
        }

        if !self.interaction.preview && self.interaction.gesture() == &Gesture::Idle {
            if let Some(selected) = state.selected_element() {
                let top = elements
                    .outline(selected)
                    .into_iter()
                    .fold(Pos2::new(f32::INFINITY, f32::INFINITY), |acc, p| acc.min(p));
                let position = Pos2::new(top.x, (top.y - FLOATING_ACTIONS_GAP).max(area.min.y));
                output.commands.extend(floating_actions(&ctx, position, selected));
            }
        }

        output.commands.extend(self.text_edit_window(&ctx, state));
        output
    }

    fn update_cursor(&self, response: &egui::Response, state: &EditorState) {
        if !response.hovered() && !self.input.is_captured() {
            return;
        }
        let icon = match (state.mode(), self.interaction.gesture()) {
            (_, Gesture::Panning { .. }) => CursorIcon::Grabbing,
            (_, Gesture::Dragging { .. }) => CursorIcon::Move,
            (_, Gesture::Resizing { handle, .. }) => handle.cursor_icon(),
            (Mode::Pan, _) => CursorIcon::Grab,
            (mode, _) if mode.places_elements() => CursorIcon::Crosshair,
            _ => return,
        };
        response.ctx.set_cursor_icon(icon);
    }

    fn text_edit_window(&mut self, ctx: &egui::Context, state: &EditorState) -> Option<Command> {
        let mut confirmed = false;
        let mut cancelled = false;
        let edit = self.interaction.text_edit_mut()?;

        egui::Window::new("Edit text")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                let editor = ui.add(egui::TextEdit::multiline(&mut edit.buffer).desired_rows(3));
                editor.request_focus();
                ui.horizontal(|ui| {
                    confirmed = ui.button("OK").clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        if cancelled {
            self.interaction.cancel_text_edit();
            None
        } else if confirmed {
            self.interaction.confirm_text_edit(state)
        } else {
            None
        }
    }
}

/// The row of buttons floating above the selected element
fn floating_actions(ctx: &egui::Context, position: Pos2, element: &crate::element::Element) -> Vec<Command> {
    let mut commands = Vec::new();
    egui::Area::new(Id::new("floating_actions"))
        .order(Order::Foreground)
        .fixed_pos(position)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    for action in FloatingAction::ALL {
                        if ui.button(action.icon()).on_hover_text(action.tooltip()).clicked() {
                            commands.push(action.command(element));
                        }
                    }
                });
            });
        });
    commands
}
