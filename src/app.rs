use std::path::PathBuf;

use crate::canvas::{upload, Canvas};
use crate::command::Command;
use crate::config::EditorConfig;
use crate::error::StorageError;
use crate::id_generator::generate_template_id;
use crate::input::shortcuts;
use crate::panels::{self, AppAction};
use crate::state::EditorState;
use crate::storage::{self, FileTemplateStore, TemplateStore, TemplateSummary};
use crate::template::{create_empty_template, Template};

const APP_NAME: &str = "Template Editor";

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct TemplateEditorApp {
    config: EditorConfig,
    /// The open template at shutdown, reopened on the next start
    last_template: Option<Template>,

    #[serde(skip)]
    state: EditorState,
    #[serde(skip)]
    canvas: Canvas,
    #[serde(skip)]
    store: FileTemplateStore,
    #[serde(skip)]
    status: Option<Status>,
    /// Stored templates listed by the load dialog while it is open
    #[serde(skip)]
    load_dialog: Option<Vec<TemplateSummary>>,
    /// A template waiting for the user to confirm discarding unsaved changes
    #[serde(skip)]
    pending_replace: Option<Template>,
    #[serde(skip)]
    window_title: String,
}

impl Default for TemplateEditorApp {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            state: EditorState::from_config(&config),
            store: FileTemplateStore::new(config.templates_dir.clone()),
            config,
            last_template: None,
            canvas: Canvas::new(),
            status: None,
            load_dialog: None,
            pending_replace: None,
            window_title: String::new(),
        }
    }
}

impl TemplateEditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let restored: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(restored.config.with_env_overrides(), restored.last_template)
    }

    pub fn with_config(config: EditorConfig, last_template: Option<Template>) -> Self {
        let mut state = EditorState::from_config(&config);
        let template = match last_template {
            Some(template) => {
                log::info!("Restoring last template {}", template.id);
                template
            }
            None => create_empty_template(generate_template_id(), "Untitled template"),
        };
        load_with_preferences(&mut state, &config, template);

        Self {
            store: FileTemplateStore::new(config.templates_dir.clone()),
            state,
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.state.dispatch(command);
        }
    }

    fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");
        self.status = Some(Status::Error(message));
    }

    /// Open `template`, asking first when that would discard unsaved changes
    fn replace_template(&mut self, template: Template) {
        if self.state.unsaved_changes() {
            self.pending_replace = Some(template);
        } else {
            self.open_template(template);
        }
    }

    fn open_template(&mut self, template: Template) {
        let name = template.name.clone();
        load_with_preferences(&mut self.state, &self.config, template);
        self.canvas.reset();
        self.set_info(format!("Opened \"{name}\""));
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::NewTemplate => {
                self.replace_template(create_empty_template(generate_template_id(), "Untitled template"));
            }
            AppAction::Save => self.save_template(),
            AppAction::OpenLoadDialog => match self.store.list_templates() {
                Ok(summaries) => self.load_dialog = Some(summaries),
                Err(err) => self.set_error(format!("Could not list templates: {err}")),
            },
            AppAction::Import => {
                if let Some(path) = pick_json_file() {
                    match storage::import_json(&path) {
                        Ok(template) => self.replace_template(template),
                        Err(err) => self.set_error(format!("Import failed: {err}")),
                    }
                }
            }
            AppAction::Export => self.export_template(),
        }
    }

    fn save_template(&mut self) {
        let Some(template) = self.state.template() else {
            return;
        };
        match self.store.save_touched(template) {
            Ok(stored) => {
                self.state.dispatch(Command::MarkSaved);
                self.set_info(format!("Saved \"{}\" to {}", stored.name, self.store.dir().display()));
            }
            Err(err) => self.set_error(format!("Save failed: {err}")),
        }
    }

    fn export_template(&mut self) {
        let Some(template) = self.state.template() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Template JSON", &["json"])
            .set_file_name(format!("{}.json", template.id))
            .save_file()
        else {
            return;
        };
        match storage::export_json(template, &path) {
            Ok(()) => self.set_info(format!("Exported to {}", path.display())),
            Err(err) => self.set_error(format!("Export failed: {err}")),
        }
    }

    fn load_stored(&mut self, id: &str) {
        match self.store.load_template(id) {
            Ok(template) => self.replace_template(template),
            Err(StorageError::NotFound(id)) => self.set_error(format!("Template {id} no longer exists")),
            Err(err) => self.set_error(format!("Load failed: {err}")),
        }
    }

    fn apply_shortcuts(&mut self, ctx: &egui::Context) {
        if self.canvas.interaction.preview || self.canvas.interaction.text_edit().is_some() {
            return;
        }
        for action in shortcuts::collect_actions(ctx) {
            let commands = shortcuts::commands_for(action, &self.state);
            self.dispatch_all(commands);
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let name = self.state.template().map(|t| t.name.as_str()).unwrap_or("No template");
        let marker = if self.state.unsaved_changes() { " •" } else { "" };
        let title = format!("{name}{marker} - {APP_NAME}");
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }

    fn load_dialog_window(&mut self, ctx: &egui::Context) {
        let Some(summaries) = &self.load_dialog else {
            return;
        };
        let mut chosen = None;
        let mut open = true;
        egui::Window::new("Load template")
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                if summaries.is_empty() {
                    ui.weak(format!("No templates in {}", self.store.dir().display()));
                }
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for summary in summaries {
                        let label = if summary.category.is_empty() {
                            summary.name.clone()
                        } else {
                            format!("{}  ({})", summary.name, summary.category)
                        };
                        if ui.button(label).on_hover_text(&summary.id).clicked() {
                            chosen = Some(summary.id.clone());
                        }
                    }
                });
            });

        if let Some(id) = chosen {
            self.load_dialog = None;
            self.load_stored(&id);
        } else if !open {
            self.load_dialog = None;
        }
    }

    fn discard_confirmation(&mut self, ctx: &egui::Context) {
        if self.pending_replace.is_none() {
            return;
        }
        let mut decision = None;
        egui::Window::new("Discard unsaved changes?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("The current template has unsaved changes.");
                ui.horizontal(|ui| {
                    if ui.button("Discard").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                });
            });

        match decision {
            Some(true) => {
                if let Some(template) = self.pending_replace.take() {
                    self.open_template(template);
                }
            }
            Some(false) => self.pending_replace = None,
            None => {}
        }
    }
}

/// Loading starts a fresh session, so the configured view settings are applied again
fn load_with_preferences(state: &mut EditorState, config: &EditorConfig, template: Template) {
    state.dispatch(Command::LoadTemplate(template));
    state.dispatch(Command::SetZoom(config.default_zoom));
    state.dispatch(Command::ToggleGrid(Some(config.show_grid)));
    state.dispatch(Command::ToggleSnapToGrid(Some(config.snap_to_grid)));
    state.dispatch(Command::SetGridSize(config.grid_size().get()));
}

fn pick_json_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Template JSON", &["json"])
        .set_title("Import template")
        .pick_file()
}

impl eframe::App for TemplateEditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.last_template = self.state.template().cloned();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let toolbar = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| panels::toolbar(ui, &self.state, &mut self.canvas.interaction))
            .inner;
        self.dispatch_all(toolbar.commands);
        for action in toolbar.actions {
            self.handle_action(action);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(Status::Info(message)) => {
                        ui.label(message);
                    }
                    Some(Status::Error(message)) => {
                        ui.colored_label(ui.visuals().error_fg_color, message);
                    }
                    None => {
                        ui.weak("Ready");
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!(
                        "{} · undo {} / redo {}",
                        self.state.mode().label(),
                        self.state.history().past_len(),
                        self.state.history().future_len()
                    ));
                });
            });
        });

        let editable = self.state.template().is_some() && !self.canvas.interaction.preview;
        let center = self.canvas.visible_center(&self.state);
        let library = egui::SidePanel::left("element_library")
            .resizable(true)
            .default_width(180.0)
            .show(ctx, |ui| panels::sidebar(ui, center, editable))
            .inner;
        self.dispatch_all(library);

        if !self.canvas.interaction.preview {
            let panel = egui::SidePanel::right("properties_panel")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    let mut commands = Vec::new();
                    egui::ScrollArea::vertical().id_salt("properties_scroll").show(ui, |ui| {
                        commands.extend(panels::properties_panel(
                            ui,
                            self.state.selected_element(),
                            self.state.template(),
                        ));
                        if let Some(template) = self.state.template() {
                            ui.add_space(12.0);
                            commands.extend(panels::layers_panel(ui, template, self.state.selected_element_id()));
                        }
                    });
                    commands
                });
            self.dispatch_all(panel.inner);
        }

        let output = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas.show(ui, &self.state))
            .inner;
        self.dispatch_all(output.commands);
        if let Some(error) = output.errors.into_iter().last() {
            self.set_error(error);
        }

        self.apply_shortcuts(ctx);
        upload::preview_files_being_dropped(ctx);
        self.load_dialog_window(ctx);
        self.discard_confirmation(ctx);
        self.update_title(ctx);
    }
}
