use egui::{Context, Event, Key, Modifiers, Vec2};

use crate::command::Command;
use crate::element::ElementPatch;
use crate::geometry::apply_snapping;
use crate::state::EditorState;

/// Editor actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Delete,
    Duplicate,
    /// Move the selection one unit (or one grid cell when `coarse`) in `direction`
    Nudge { direction: Vec2, coarse: bool },
    ClearSelection,
}

/// Map a key press to an action
pub fn action_for(key: Key, modifiers: Modifiers) -> Option<ShortcutAction> {
    let action = match key {
        Key::Z if modifiers.command && modifiers.shift => ShortcutAction::Redo,
        Key::Z if modifiers.command => ShortcutAction::Undo,
        Key::Y if modifiers.command => ShortcutAction::Redo,
        Key::D if modifiers.command => ShortcutAction::Duplicate,
        Key::Delete | Key::Backspace => ShortcutAction::Delete,
        Key::Escape => ShortcutAction::ClearSelection,
        Key::ArrowLeft => nudge(Vec2::new(-1.0, 0.0), modifiers),
        Key::ArrowRight => nudge(Vec2::new(1.0, 0.0), modifiers),
        Key::ArrowUp => nudge(Vec2::new(0.0, -1.0), modifiers),
        Key::ArrowDown => nudge(Vec2::new(0.0, 1.0), modifiers),
        _ => return None,
    };
    Some(action)
}

fn nudge(direction: Vec2, modifiers: Modifiers) -> ShortcutAction {
    ShortcutAction::Nudge {
        direction,
        coarse: modifiers.shift,
    }
}

/// Actions pressed this frame. Nothing is reported while a text field has focus.
pub fn collect_actions(ctx: &Context) -> Vec<ShortcutAction> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => action_for(*key, *modifiers),
                _ => None,
            })
            .collect()
    })
}

/// Commands that carry out `action` against the current state
pub fn commands_for(action: ShortcutAction, state: &EditorState) -> Vec<Command> {
    let selected = state.selected_element();
    match action {
        ShortcutAction::Undo => vec![Command::Undo],
        ShortcutAction::Redo => vec![Command::Redo],
        ShortcutAction::ClearSelection => vec![Command::SelectElement(None)],
        ShortcutAction::Delete => selected
            .map(|element| vec![Command::RemoveElement(element.id().to_owned())])
            .unwrap_or_default(),
        ShortcutAction::Duplicate => selected
            .map(|element| vec![Command::DuplicateElement(element.id().to_owned())])
            .unwrap_or_default(),
        ShortcutAction::Nudge { direction, coarse } => selected
            .map(|element| {
                // A one-unit step would snap straight back, so snapping always moves a cell
                let grid = state.grid_size();
                let step = if coarse || state.snap_to_grid() { grid.get() as f32 } else { 1.0 };
                let position = apply_snapping(element.position + direction * step, state.snap_to_grid(), grid);
                vec![Command::UpdateElement {
                    id: element.id().to_owned(),
                    patch: ElementPatch::position(position),
                }]
            })
            .unwrap_or_default(),
    }
}
