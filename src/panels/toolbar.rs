use egui::{Button, DragValue, Ui};

use crate::canvas::CanvasInteraction;
use crate::command::Command;
use crate::components::ToolButton;
use crate::element::ShapeKind;
use crate::state::{EditorState, Mode, DEFAULT_ZOOM};

pub const ZOOM_STEP: f32 = 0.1;
const MAX_GRID_SIZE: u32 = 200;

/// Requests the toolbar cannot fulfil with a command alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    NewTemplate,
    Save,
    OpenLoadDialog,
    Import,
    Export,
}

#[derive(Debug, Default)]
pub struct ToolbarOutput {
    pub commands: Vec<Command>,
    pub actions: Vec<AppAction>,
}

pub fn zoom_in(zoom: f32) -> Command {
    Command::SetZoom(zoom + ZOOM_STEP)
}

pub fn zoom_out(zoom: f32) -> Command {
    Command::SetZoom(zoom - ZOOM_STEP)
}

pub fn toolbar(ui: &mut Ui, state: &EditorState, interaction: &mut CanvasInteraction) -> ToolbarOutput {
    let mut output = ToolbarOutput::default();
    let has_template = state.template().is_some();

    ui.horizontal_wrapped(|ui| {
        if ui.button("🗋 New").clicked() {
            output.actions.push(AppAction::NewTemplate);
        }
        if ui.add_enabled(has_template, Button::new("💾 Save")).clicked() {
            output.actions.push(AppAction::Save);
        }
        if ui.button("📂 Load").clicked() {
            output.actions.push(AppAction::OpenLoadDialog);
        }
        if ui.button("⬇ Import").clicked() {
            output.actions.push(AppAction::Import);
        }
        if ui.add_enabled(has_template, Button::new("⬆ Export")).clicked() {
            output.actions.push(AppAction::Export);
        }

        ui.separator();

        ui.add_enabled_ui(has_template && !interaction.preview, |ui| {
            for mode in Mode::ALL {
                if ToolButton::new(mode, state.mode() == mode).show(ui).clicked() {
                    log::info!("Mode selected from toolbar: {}", mode.label());
                    output.commands.push(Command::SetMode(mode));
                }
            }

            egui::ComboBox::from_id_salt("shape_picker")
                .selected_text(format!("{} {}", interaction.shape_kind.icon(), interaction.shape_kind.label()))
                .show_ui(ui, |ui| {
                    for kind in ShapeKind::ALL {
                        let label = format!("{} {}", kind.icon(), kind.label());
                        if ui.selectable_value(&mut interaction.shape_kind, kind, label).clicked() {
                            output.commands.push(Command::SetMode(Mode::Shape));
                        }
                    }
                });
        });

        ui.separator();

        if ui.add_enabled(state.can_undo(), Button::new("↶")).on_hover_text("Undo").clicked() {
            output.commands.push(Command::Undo);
        }
        if ui.add_enabled(state.can_redo(), Button::new("↷")).on_hover_text("Redo").clicked() {
            output.commands.push(Command::Redo);
        }

        ui.separator();

        let zoom = state.zoom();
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            output.commands.push(zoom_out(zoom));
        }
        if ui
            .button(format!("{:.0}%", zoom * 100.0))
            .on_hover_text("Reset zoom")
            .clicked()
        {
            output.commands.push(Command::SetZoom(DEFAULT_ZOOM));
            interaction.reset_pan();
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            output.commands.push(zoom_in(zoom));
        }

        ui.separator();

        let mut show_grid = state.show_grid();
        if ui.toggle_value(&mut show_grid, "# Grid").changed() {
            output.commands.push(Command::ToggleGrid(Some(show_grid)));
        }
        let mut snap = state.snap_to_grid();
        if ui.toggle_value(&mut snap, "🧲 Snap").changed() {
            output.commands.push(Command::ToggleSnapToGrid(Some(snap)));
        }
        let mut grid_size = state.grid_size().get();
        if ui
            .add(DragValue::new(&mut grid_size).range(1..=MAX_GRID_SIZE).suffix(" px"))
            .on_hover_text("Grid size")
            .changed()
        {
            output.commands.push(Command::SetGridSize(grid_size.max(1)));
        }

        ui.separator();

        if ui.toggle_value(&mut interaction.preview, "👁 Preview").changed() {
            log::info!("Preview {}", if interaction.preview { "on" } else { "off" });
            if interaction.preview {
                output.commands.push(Command::SetMode(Mode::Select));
            }
        }
    });

    output
}
