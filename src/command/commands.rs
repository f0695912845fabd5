use crate::element::{Element, ElementId, ElementPatch};
use crate::state::Mode;
use crate::template::{Template, TemplateProperty};

/// Every way the editor state can change. Dispatched through [`super::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a fresh session around a template
    LoadTemplate(Template),
    SelectElement(Option<ElementId>),
    UpdateElement {
        id: ElementId,
        patch: ElementPatch,
    },
    /// Insert an element, snapping it to the grid if enabled, and select it
    AddElement(Element),
    DuplicateElement(ElementId),
    RemoveElement(ElementId),
    SetZoom(f32),
    /// `None` flips the current value
    ToggleGrid(Option<bool>),
    /// `None` flips the current value
    ToggleSnapToGrid(Option<bool>),
    SetGridSize(u32),
    SetMode(Mode),
    UpdateTemplateProperty(TemplateProperty),
    Undo,
    Redo,
    ResetEditor,

    /// Open a drag or resize; the following updates form one undo step
    BeginGesture,
    /// Live update during a gesture, coalesced into the gesture's undo step
    GestureUpdate {
        id: ElementId,
        patch: ElementPatch,
    },
    EndGesture,

    /// The current template has been persisted
    MarkSaved,
}

impl Command {
    /// Short human readable name, used in reducer logs
    pub fn label(&self) -> &'static str {
        match self {
            Command::LoadTemplate(_) => "Load template",
            Command::SelectElement(_) => "Select element",
            Command::UpdateElement { .. } => "Update element",
            Command::AddElement(_) => "Add element",
            Command::DuplicateElement(_) => "Duplicate element",
            Command::RemoveElement(_) => "Remove element",
            Command::SetZoom(_) => "Set zoom",
            Command::ToggleGrid(_) => "Toggle grid",
            Command::ToggleSnapToGrid(_) => "Toggle snap to grid",
            Command::SetGridSize(_) => "Set grid size",
            Command::SetMode(_) => "Set mode",
            Command::UpdateTemplateProperty(_) => "Update template",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ResetEditor => "Reset editor",
            Command::BeginGesture => "Begin gesture",
            Command::GestureUpdate { .. } => "Gesture update",
            Command::EndGesture => "End gesture",
            Command::MarkSaved => "Mark saved",
        }
    }
}
