use std::sync::Arc;

use super::Command;
use crate::element::{Element, ElementId, ElementPatch};
use crate::geometry::grid::apply_snapping;
use crate::id_generator::generate_id;
use crate::state::{EditorState, MAX_ZOOM, MIN_ZOOM};
use crate::template::TemplateProperty;

/// Apply `command` to `state`, producing the next state.
///
/// Never fails: a command whose preconditions do not hold (no template loaded, unknown
/// element id, invalid value) returns the state unchanged.
pub fn reduce(mut state: EditorState, command: Command) -> EditorState {
    log::trace!("reduce: {}", command.label());

    match command {
        Command::LoadTemplate(template) => {
            let template = template.normalized();
            log::info!("📄 Loaded template {} ({} elements)", template.id, template.elements.len());
            EditorState {
                template: Some(Arc::new(template)),
                ..EditorState::with_history_limit(state.history.limit())
            }
        }

        Command::SelectElement(None) => {
            state.selected_element_id = None;
            state
        }
        Command::SelectElement(Some(id)) => {
            if has_element(&state, &id) {
                state.selected_element_id = Some(id);
            } else {
                log::debug!("Ignoring selection of unknown element {id}");
            }
            state
        }

        Command::UpdateElement { id, patch } => update_element(state, &id, &patch),

        Command::AddElement(element) => add_element(state, element),

        Command::DuplicateElement(id) => {
            let Some(original) = state.template.as_ref().and_then(|t| t.element(&id)) else {
                log::debug!("Ignoring duplicate of unknown element {id}");
                return state;
            };
            let copy = original.duplicate(generate_id(original.element_type()));
            let copy_id = copy.id().to_owned();
            record(&mut state);
            if let Some(template) = state.template_mut() {
                template.elements.push(copy);
            }
            state.selected_element_id = Some(copy_id);
            state
        }

        Command::RemoveElement(id) => {
            if !has_element(&state, &id) {
                log::debug!("Ignoring removal of unknown element {id}");
                return state;
            }
            record(&mut state);
            if let Some(template) = state.template_mut() {
                template.remove_element(&id);
            }
            state.selected_element_id = None;
            state
        }

        Command::SetZoom(zoom) => {
            if zoom.is_finite() {
                state.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            } else {
                log::debug!("Ignoring non-finite zoom {zoom}");
            }
            state
        }

        Command::ToggleGrid(value) => {
            state.show_grid = value.unwrap_or(!state.show_grid);
            state
        }

        Command::ToggleSnapToGrid(value) => {
            state.snap_to_grid = value.unwrap_or(!state.snap_to_grid);
            state
        }

        Command::SetGridSize(size) => {
            match std::num::NonZeroU32::new(size) {
                Some(size) => state.grid_size = size,
                None => log::debug!("Ignoring zero grid size"),
            }
            state
        }

        Command::SetMode(mode) => {
            state.mode = mode;
            state
        }

        Command::UpdateTemplateProperty(property) => update_template_property(state, property),

        Command::Undo => {
            let current = state.snapshot();
            match state.history.undo(current) {
                Some(previous) => {
                    state.restore(previous);
                    state.unsaved_changes = true;
                }
                None => log::debug!("Nothing to undo"),
            }
            state
        }

        Command::Redo => {
            let current = state.snapshot();
            match state.history.redo(current) {
                Some(next) => {
                    state.restore(next);
                    state.unsaved_changes = true;
                }
                None => log::debug!("Nothing to redo"),
            }
            state
        }

        Command::ResetEditor => {
            log::info!("🔄 Editor reset");
            EditorState::with_history_limit(state.history.limit())
        }

        Command::BeginGesture => {
            if state.template.is_some() {
                let before = state.snapshot();
                state.history.begin_gesture(before);
            }
            state
        }

        Command::GestureUpdate { id, patch } => {
            let Some(current) = state.template.as_ref().and_then(|t| t.element(&id)) else {
                log::debug!("Ignoring gesture update of unknown element {id}");
                return state;
            };
            let mut patched = current.clone();
            patched.apply_patch(&patch);
            if &patched == current {
                return state;
            }
            record(&mut state);
            replace_element(&mut state, &id, patched);
            state
        }

        Command::EndGesture => {
            if state.history.end_gesture() {
                log::debug!("Gesture recorded as one undo step");
            }
            state
        }

        Command::MarkSaved => {
            state.unsaved_changes = false;
            state
        }
    }
}

fn has_element(state: &EditorState, id: &str) -> bool {
    state.template.as_ref().is_some_and(|t| t.contains_element(id))
}

/// Push the current document onto the undo stack ahead of a mutation.
///
/// Inside an open gesture only the first mutation pushes; later ones join its step.
fn record(state: &mut EditorState) {
    if state.history.gesture_open() {
        state.history.commit_gesture();
    } else {
        let snapshot = state.snapshot();
        state.history.push(snapshot);
    }
    state.unsaved_changes = true;
}

fn replace_element(state: &mut EditorState, id: &str, element: Element) {
    if let Some(slot) = state.template_mut().and_then(|t| t.element_mut(id)) {
        *slot = element;
    }
}

fn update_element(mut state: EditorState, id: &ElementId, patch: &ElementPatch) -> EditorState {
    if !has_element(&state, id) {
        log::debug!("Ignoring update of unknown element {id}");
        return state;
    }
    record(&mut state);
    if let Some(element) = state.template_mut().and_then(|t| t.element_mut(id)) {
        element.apply_patch(patch);
    }
    state
}

fn add_element(mut state: EditorState, mut element: Element) -> EditorState {
    let Some(template) = state.template.as_ref() else {
        log::debug!("Ignoring add without a template");
        return state;
    };
    if template.contains_element(element.id()) {
        log::debug!("Ignoring add of duplicate element id {}", element.id());
        return state;
    }

    element.position = apply_snapping(element.position, state.snap_to_grid, state.grid_size);
    let element = element.normalized();
    let id = element.id().to_owned();
    log::info!("➕ Adding {} element {id}", element.element_type());

    record(&mut state);
    if let Some(template) = state.template_mut() {
        template.elements.push(element);
    }
    state.selected_element_id = Some(id);
    state
}

fn update_template_property(mut state: EditorState, property: TemplateProperty) -> EditorState {
    if state.template.is_none() {
        log::debug!("Ignoring template property update without a template");
        return state;
    }
    record(&mut state);
    if let Some(template) = state.template_mut() {
        template.apply_property(property);
    }
    state
}
