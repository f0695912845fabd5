//! Session-scoped pointer interaction for the canvas.
//!
//! Everything transient about a gesture (what is being dragged, where it started,
//! the pan offset, the text being edited) lives here and is owned by the canvas
//! alone. The only way out is a list of [`Command`]s for the reducer.

use egui::{Pos2, Rect, Vec2};

use crate::command::Command;
use crate::element::factory::{create_shape_element, create_text_element};
use crate::element::{Element, ElementId, ElementPatch, ShapeKind, Size, TextPatch, MIN_ELEMENT_SIZE};
use crate::geometry::grid::apply_snapping;
use crate::geometry::hit_testing::{handle_at, topmost_element_at};
use crate::geometry::resize::{resize_rotated, ResizeHandle};
use crate::geometry::rotation::ROTATION_STEP;
use crate::geometry::viewport::Viewport;
use crate::id_generator::generate_id;
use crate::input::InputEvent;
use crate::state::{EditorState, Mode};

/// The pointer gesture currently in progress
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        id: ElementId,
        start_position: Pos2,
        start_pointer: Pos2,
    },
    Resizing {
        id: ElementId,
        handle: ResizeHandle,
        start_rect: Rect,
        rotation: f32,
        start_pointer: Pos2,
    },
    Panning {
        last_pointer: Pos2,
    },
}

impl Gesture {
    /// Whether this gesture was opened with [`Command::BeginGesture`]
    fn is_element_gesture(&self) -> bool {
        matches!(self, Gesture::Dragging { .. } | Gesture::Resizing { .. })
    }
}

/// In-place text editing opened by double-clicking a text element
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    pub id: ElementId,
    pub buffer: String,
}

/// Buttons floating next to the selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingAction {
    RotateLeft,
    RotateRight,
    Duplicate,
    ToggleOpacity,
    Delete,
}

impl FloatingAction {
    pub const ALL: [FloatingAction; 5] = [
        FloatingAction::RotateLeft,
        FloatingAction::RotateRight,
        FloatingAction::Duplicate,
        FloatingAction::ToggleOpacity,
        FloatingAction::Delete,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            FloatingAction::RotateLeft => "⟲",
            FloatingAction::RotateRight => "⟳",
            FloatingAction::Duplicate => "⧉",
            FloatingAction::ToggleOpacity => "👁",
            FloatingAction::Delete => "🗑",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            FloatingAction::RotateLeft => "Rotate -15°",
            FloatingAction::RotateRight => "Rotate +15°",
            FloatingAction::Duplicate => "Duplicate",
            FloatingAction::ToggleOpacity => "Toggle opacity",
            FloatingAction::Delete => "Delete",
        }
    }

    /// The command this button issues for `element`
    pub fn command(self, element: &Element) -> Command {
        let id = element.id().to_owned();
        match self {
            FloatingAction::RotateLeft => Command::UpdateElement {
                id,
                patch: ElementPatch::rotation(element.rotation() - ROTATION_STEP),
            },
            FloatingAction::RotateRight => Command::UpdateElement {
                id,
                patch: ElementPatch::rotation(element.rotation() + ROTATION_STEP),
            },
            FloatingAction::Duplicate => Command::DuplicateElement(id),
            FloatingAction::ToggleOpacity => Command::UpdateElement {
                id,
                patch: ElementPatch::opacity(element.toggled_opacity()),
            },
            FloatingAction::Delete => Command::RemoveElement(id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CanvasInteraction {
    gesture: Gesture,
    /// Session pan offset in screen points
    pub pan: Vec2,
    /// Read-only rendering: no handles, no outlines, no mutations
    pub preview: bool,
    /// Shape placed by the next click in shape mode
    pub shape_kind: ShapeKind,
    text_edit: Option<TextEdit>,
    hovered: Option<ElementId>,
    /// Template position of an image placement waiting for a picked file
    image_request: Option<Pos2>,
}

impl Default for CanvasInteraction {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            pan: Vec2::ZERO,
            preview: false,
            shape_kind: ShapeKind::Rectangle,
            text_edit: None,
            hovered: None,
            image_request: None,
        }
    }
}

impl CanvasInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn hovered(&self) -> Option<&str> {
        if self.preview {
            return None;
        }
        self.hovered.as_deref()
    }

    pub fn text_edit(&self) -> Option<&TextEdit> {
        self.text_edit.as_ref()
    }

    pub fn text_edit_mut(&mut self) -> Option<&mut TextEdit> {
        self.text_edit.as_mut()
    }

    /// Close the text editor, returning the content update if the text changed
    pub fn confirm_text_edit(&mut self, state: &EditorState) -> Option<Command> {
        let edit = self.text_edit.take()?;
        let current = state.template()?.element(&edit.id)?.as_text()?;
        if current.content == edit.buffer {
            return None;
        }
        Some(Command::UpdateElement {
            id: edit.id,
            patch: ElementPatch::text(TextPatch::content(edit.buffer)),
        })
    }

    pub fn cancel_text_edit(&mut self) {
        self.text_edit = None;
    }

    /// Take the pending image placement, if a click in image mode requested one
    pub fn take_image_request(&mut self) -> Option<Pos2> {
        self.image_request.take()
    }

    pub fn reset_pan(&mut self) {
        self.pan = Vec2::ZERO;
    }

    /// Drop all transient state, e.g. after a new template is loaded
    pub fn reset(&mut self) {
        *self = Self {
            preview: self.preview,
            shape_kind: self.shape_kind,
            ..Self::default()
        };
    }

    /// Feed one pointer event through the gesture state machine
    pub fn handle_event(&mut self, event: &InputEvent, state: &EditorState, viewport: &Viewport) -> Vec<Command> {
        match *event {
            InputEvent::PointerDown { position, .. } => self.pointer_down(position, state, viewport),
            InputEvent::PointerMove { position, .. } => self.pointer_move(position, state, viewport),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::DoubleClick { position } => {
                self.double_click(position, state, viewport);
                Vec::new()
            }
            InputEvent::Hover { position } => {
                self.hovered = state
                    .template()
                    .and_then(|template| topmost_element_at(template, viewport.to_template(position)))
                    .map(|element| element.id().to_owned());
                Vec::new()
            }
        }
    }

    fn pointer_down(&mut self, screen: Pos2, state: &EditorState, viewport: &Viewport) -> Vec<Command> {
        // a release we never saw still has to close the open gesture
        let mut commands = self.pointer_up();

        if state.mode() == Mode::Pan {
            self.gesture = Gesture::Panning { last_pointer: screen };
            return commands;
        }
        let Some(template) = state.template() else {
            return commands;
        };
        if self.preview {
            return commands;
        }

        let point = viewport.to_template(screen);
        match state.mode() {
            Mode::Select => {}
            Mode::Text => {
                let element = create_text_element(generate_id("text"), point, None);
                commands.extend([Command::AddElement(element), Command::SetMode(Mode::Select)]);
                return commands;
            }
            Mode::Shape => {
                let element = create_shape_element(generate_id("shape"), point, Some(self.shape_kind));
                commands.extend([Command::AddElement(element), Command::SetMode(Mode::Select)]);
                return commands;
            }
            Mode::Image => {
                log::info!("🖼 Image placement requested at {point:?}");
                self.image_request = Some(point);
                commands.push(Command::SetMode(Mode::Select));
                return commands;
            }
            Mode::Pan => return commands,
        }

        if let Some(selected) = state.selected_element() {
            if let Some(handle) = handle_at(selected, screen, viewport) {
                self.gesture = Gesture::Resizing {
                    id: selected.id().to_owned(),
                    handle,
                    start_rect: selected.rect(),
                    rotation: selected.rotation(),
                    start_pointer: screen,
                };
                commands.push(Command::BeginGesture);
                return commands;
            }
        }

        match topmost_element_at(template, point) {
            Some(element) => {
                let id = element.id().to_owned();
                if state.selected_element_id() != Some(id.as_str()) {
                    commands.push(Command::SelectElement(Some(id.clone())));
                }
                self.gesture = Gesture::Dragging {
                    id,
                    start_position: element.position,
                    start_pointer: screen,
                };
                commands.push(Command::BeginGesture);
            }
            None => {
                if state.selected_element_id().is_some() {
                    commands.push(Command::SelectElement(None));
                }
            }
        }
        commands
    }

    fn pointer_move(&mut self, screen: Pos2, state: &EditorState, viewport: &Viewport) -> Vec<Command> {
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { last_pointer } => {
                self.pan += screen - *last_pointer;
                *last_pointer = screen;
                Vec::new()
            }
            Gesture::Dragging {
                id,
                start_position,
                start_pointer,
            } => {
                let delta = viewport.screen_delta_to_template(screen - *start_pointer);
                let position = apply_snapping(*start_position + delta, state.snap_to_grid(), state.grid_size());
                vec![Command::GestureUpdate {
                    id: id.clone(),
                    patch: ElementPatch::position(position),
                }]
            }
            Gesture::Resizing {
                id,
                handle,
                start_rect,
                rotation,
                start_pointer,
            } => {
                let delta = viewport.screen_delta_to_template(screen - *start_pointer);
                let rect = resize_rotated(*start_rect, *handle, delta, *rotation, MIN_ELEMENT_SIZE);
                vec![Command::GestureUpdate {
                    id: id.clone(),
                    patch: ElementPatch::geometry(rect.min, Size::from(rect.size())),
                }]
            }
        }
    }

    fn pointer_up(&mut self) -> Vec<Command> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        if gesture.is_element_gesture() {
            vec![Command::EndGesture]
        } else {
            Vec::new()
        }
    }

    fn double_click(&mut self, screen: Pos2, state: &EditorState, viewport: &Viewport) {
        if self.preview || state.mode() != Mode::Select {
            return;
        }
        let Some(template) = state.template() else {
            return;
        };
        let point = viewport.to_template(screen);
        if let Some(element) = topmost_element_at(template, point) {
            if let Some(text) = element.as_text() {
                self.text_edit = Some(TextEdit {
                    id: element.id().to_owned(),
                    buffer: text.content.clone(),
                });
            }
        }
    }
}
