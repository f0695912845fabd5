use egui::Pos2;
use proptest::prelude::*;
use template_editor::element::factory::{create_shape_element, create_text_element};
use template_editor::element::{ElementPatch, ShapeKind, StylePatch, TextPatch};
use template_editor::state::Mode;
use template_editor::template::TemplateProperty;
use template_editor::{create_empty_template, Command, EditorState, ElementKind};

// Helper to create an editor with an empty badge template loaded
fn loaded_state() -> EditorState {
    let mut state = EditorState::new();
    state.dispatch(Command::LoadTemplate(create_empty_template("badge-1", "Badge")));
    state
}

fn position_of(state: &EditorState, id: &str) -> Option<Pos2> {
    Some(state.template()?.element(id)?.position)
}

fn text_content(state: &EditorState, id: &str) -> Option<String> {
    let element = state.template()?.element(id)?;
    element.as_text().map(|text| text.content.clone())
}

#[test]
fn add_update_undo_scenario() {
    let mut state = loaded_state();

    state.dispatch(Command::AddElement(create_text_element(
        "greeting",
        Pos2::ZERO,
        Some("Hello".to_owned()),
    )));
    state.dispatch(Command::UpdateElement {
        id: "greeting".to_owned(),
        patch: ElementPatch::text(TextPatch::content("World")),
    });
    assert_eq!(text_content(&state, "greeting").as_deref(), Some("World"));

    state.dispatch(Command::Undo);
    assert_eq!(text_content(&state, "greeting").as_deref(), Some("Hello"));

    state.dispatch(Command::Undo);
    let template = state.template().expect("template stays loaded");
    assert!(template.elements.is_empty());
    assert!(!state.can_undo());
    assert!(state.unsaved_changes());
}

#[test]
fn undo_n_times_restores_the_original_template() {
    let mut state = loaded_state();
    let original = state.template().cloned();

    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::new(10.0, 10.0), None)));
    state.dispatch(Command::AddElement(create_text_element("b", Pos2::new(50.0, 50.0), None)));
    state.dispatch(Command::UpdateElement {
        id: "a".to_owned(),
        patch: ElementPatch::rotation(45.0),
    });
    state.dispatch(Command::UpdateTemplateProperty(TemplateProperty::Name("Gala".to_owned())));

    for _ in 0..4 {
        state.dispatch(Command::Undo);
    }
    assert_eq!(state.template().cloned(), original);
}

#[test]
fn redo_after_undo_restores_the_exact_prior_state() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::new(10.0, 10.0), None)));
    let before_undo = (state.template().cloned(), state.selected_element_id().map(str::to_owned));

    state.dispatch(Command::Undo);
    state.dispatch(Command::Redo);

    let after_redo = (state.template().cloned(), state.selected_element_id().map(str::to_owned));
    assert_eq!(after_redo, before_undo);
    assert!(!state.can_redo());
}

#[test]
fn mutating_after_undo_clears_redo() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    state.dispatch(Command::Undo);
    assert!(state.can_redo());

    state.dispatch(Command::AddElement(create_shape_element("b", Pos2::ZERO, None)));
    assert!(!state.can_redo());
    assert_eq!(state.history().future_len(), 0);
}

#[test]
fn add_snaps_to_grid_when_enabled() {
    let mut state = loaded_state();
    state.dispatch(Command::ToggleSnapToGrid(Some(true)));
    state.dispatch(Command::AddElement(create_text_element("t", Pos2::new(13.0, 27.0), None)));

    let element = state.selected_element().expect("added element is selected");
    assert_eq!(element.id(), "t");
    assert_eq!(element.position, Pos2::new(20.0, 20.0));
}

#[test]
fn add_with_existing_id_is_ignored() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    state.dispatch(Command::AddElement(create_text_element("a", Pos2::ZERO, None)));

    let template = state.template().expect("template");
    assert_eq!(template.elements.len(), 1);
    assert!(matches!(template.elements[0].kind, ElementKind::Shape(_)));
    assert_eq!(state.history().past_len(), 1);
}

#[test]
fn duplicate_offsets_and_keeps_style() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element(
        "star",
        Pos2::new(100.0, 100.0),
        Some(ShapeKind::Star),
    )));
    state.dispatch(Command::DuplicateElement("star".to_owned()));

    let template = state.template().expect("template");
    assert_eq!(template.elements.len(), 2);
    let original = template.element("star").expect("original kept");
    let copy = state.selected_element().expect("copy is selected");
    assert_ne!(copy.id(), "star");
    assert_eq!(copy.position, Pos2::new(120.0, 120.0));
    assert_eq!(copy.kind, original.kind);
    assert_eq!(copy.size, original.size);
}

#[test]
fn remove_clears_selection_even_for_another_element() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    state.dispatch(Command::AddElement(create_shape_element("b", Pos2::ZERO, None)));
    assert_eq!(state.selected_element_id(), Some("b"));

    state.dispatch(Command::RemoveElement("a".to_owned()));
    assert_eq!(state.selected_element_id(), None);
    assert!(state.template().expect("template").element("b").is_some());
}

#[test]
fn view_commands_never_push_history() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    let past = state.history().past_len();

    state.dispatch(Command::SelectElement(None));
    state.dispatch(Command::SelectElement(Some("a".to_owned())));
    state.dispatch(Command::SetZoom(2.5));
    state.dispatch(Command::ToggleGrid(None));
    state.dispatch(Command::ToggleSnapToGrid(None));
    state.dispatch(Command::SetMode(Mode::Pan));
    state.dispatch(Command::SetGridSize(10));

    assert_eq!(state.history().past_len(), past);
    assert_eq!(state.zoom(), 2.5);
    assert_eq!(state.mode(), Mode::Pan);
}

#[test]
fn zero_grid_size_is_rejected() {
    let mut state = loaded_state();
    state.dispatch(Command::SetGridSize(0));
    assert_eq!(state.grid_size().get(), 20);
}

#[test]
fn zoom_is_clamped() {
    let mut state = loaded_state();
    state.dispatch(Command::SetZoom(50.0));
    assert_eq!(state.zoom(), 5.0);
    state.dispatch(Command::SetZoom(0.0));
    assert_eq!(state.zoom(), 0.1);
}

#[test]
fn unknown_ids_are_no_ops() {
    let state = loaded_state();
    let before = state.clone();

    let mut state = state;
    state.dispatch(Command::UpdateElement {
        id: "ghost".to_owned(),
        patch: ElementPatch::opacity(0.2),
    });
    state.dispatch(Command::RemoveElement("ghost".to_owned()));
    state.dispatch(Command::DuplicateElement("ghost".to_owned()));
    state.dispatch(Command::SelectElement(Some("ghost".to_owned())));

    assert_eq!(state, before);
}

#[test]
fn commands_without_a_template_are_no_ops() {
    let mut state = EditorState::new();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    state.dispatch(Command::UpdateTemplateProperty(TemplateProperty::Width(10.0)));
    assert!(state.template().is_none());
    assert!(!state.can_undo());
    assert!(!state.unsaved_changes());
}

#[test]
fn mismatched_style_patch_is_ignored() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    let before = state.selected_element().cloned();

    state.dispatch(Command::UpdateElement {
        id: "a".to_owned(),
        patch: ElementPatch {
            style: Some(StylePatch::Text(TextPatch::content("nope"))),
            ..ElementPatch::default()
        },
    });
    assert_eq!(state.selected_element().cloned(), before);
}

#[test]
fn rotation_is_stored_normalized() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    state.dispatch(Command::UpdateElement {
        id: "a".to_owned(),
        patch: ElementPatch::rotation(-15.0),
    });
    assert_eq!(state.selected_element().map(|e| e.rotation()), Some(345.0));

    state.dispatch(Command::UpdateElement {
        id: "a".to_owned(),
        patch: ElementPatch::rotation(375.0),
    });
    assert_eq!(state.selected_element().map(|e| e.rotation()), Some(15.0));
}

#[test]
fn history_cap_drops_the_oldest_entries() {
    let mut state = EditorState::with_history_limit(3);
    state.dispatch(Command::LoadTemplate(create_empty_template("t", "Ticket")));
    assert_eq!(state.history().limit(), 3);

    for i in 0..5 {
        state.dispatch(Command::AddElement(create_shape_element(format!("s{i}"), Pos2::ZERO, None)));
    }
    assert_eq!(state.history().past_len(), 3);

    for _ in 0..5 {
        state.dispatch(Command::Undo);
    }
    // the two oldest additions can no longer be undone
    let ids: Vec<&str> = state.template().expect("template").elements.iter().map(|e| e.id()).collect();
    assert_eq!(ids, ["s0", "s1"]);
}

#[test]
fn gesture_is_one_undo_step() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::new(10.0, 10.0), None)));
    let past = state.history().past_len();

    state.dispatch(Command::BeginGesture);
    for x in [20.0, 30.0, 40.0, 50.0] {
        state.dispatch(Command::GestureUpdate {
            id: "a".to_owned(),
            patch: ElementPatch::position(Pos2::new(x, 10.0)),
        });
    }
    state.dispatch(Command::EndGesture);

    assert_eq!(state.history().past_len(), past + 1);
    assert_eq!(state.selected_element().map(|e| e.position), Some(Pos2::new(50.0, 10.0)));

    state.dispatch(Command::Undo);
    assert_eq!(position_of(&state, "a"), Some(Pos2::new(10.0, 10.0)));
}

#[test]
fn empty_gesture_leaves_history_untouched() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::new(10.0, 10.0), None)));
    state.dispatch(Command::AddElement(create_shape_element("b", Pos2::new(10.0, 10.0), None)));
    state.dispatch(Command::Undo);
    let past = state.history().past_len();
    let future = state.history().future_len();

    state.dispatch(Command::BeginGesture);
    state.dispatch(Command::GestureUpdate {
        id: "a".to_owned(),
        patch: ElementPatch::position(Pos2::new(10.0, 10.0)),
    });
    state.dispatch(Command::EndGesture);

    assert_eq!(state.history().past_len(), past);
    assert_eq!(state.history().future_len(), future);
    assert!(state.can_redo());
}

#[test]
fn load_starts_a_fresh_session() {
    let mut state = EditorState::with_history_limit(7);
    state.dispatch(Command::LoadTemplate(create_empty_template("badge-1", "Badge")));
    state.dispatch(Command::SetZoom(3.0));
    state.dispatch(Command::ToggleGrid(Some(false)));
    state.dispatch(Command::ToggleSnapToGrid(Some(true)));
    state.dispatch(Command::SetGridSize(7));
    state.dispatch(Command::SetMode(Mode::Pan));
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));

    state.dispatch(Command::LoadTemplate(create_empty_template("other", "Invitation")));

    let fresh = EditorState::new();
    assert_eq!(state.zoom(), fresh.zoom());
    assert_eq!(state.show_grid(), fresh.show_grid());
    assert_eq!(state.snap_to_grid(), fresh.snap_to_grid());
    assert_eq!(state.grid_size(), fresh.grid_size());
    assert_eq!(state.mode(), Mode::Select);
    assert_eq!(state.selected_element_id(), None);
    assert!(!state.can_undo());
    assert!(!state.unsaved_changes());
    assert_eq!(state.history().limit(), 7);
    assert_eq!(state.template().map(|t| t.id.as_str()), Some("other"));
}

#[test]
fn undo_during_a_drag_keeps_the_rest_of_the_drag_as_one_step() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::new(10.0, 10.0), None)));

    let drag = |state: &mut EditorState, xs: [f32; 3]| {
        for x in xs {
            state.dispatch(Command::GestureUpdate {
                id: "a".to_owned(),
                patch: ElementPatch::position(Pos2::new(x, 10.0)),
            });
        }
    };
    state.dispatch(Command::BeginGesture);
    drag(&mut state, [20.0, 30.0, 40.0]);
    state.dispatch(Command::Undo);
    assert_eq!(position_of(&state, "a"), Some(Pos2::new(10.0, 10.0)));

    drag(&mut state, [50.0, 60.0, 70.0]);
    state.dispatch(Command::EndGesture);

    assert_eq!(state.history().past_len(), 2);
    assert_eq!(state.history().future_len(), 0);
    state.dispatch(Command::Undo);
    assert_eq!(position_of(&state, "a"), Some(Pos2::new(10.0, 10.0)));
}

#[test]
fn mark_saved_and_reset() {
    let mut state = loaded_state();
    state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
    assert!(state.unsaved_changes());
    state.dispatch(Command::MarkSaved);
    assert!(!state.unsaved_changes());

    state.dispatch(Command::ResetEditor);
    assert!(state.template().is_none());
    assert!(!state.can_undo());
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize, f32, f32),
    Move(usize, f32, f32),
    Rotate(usize, f32),
    Remove(usize),
    Rename(String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..6, 0.0f32..800.0, 0.0f32..600.0).prop_map(|(i, x, y)| Op::Add(i, x, y)),
        (0usize..6, 0.0f32..800.0, 0.0f32..600.0).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        (0usize..6, -720.0f32..720.0).prop_map(|(i, deg)| Op::Rotate(i, deg)),
        (0usize..6).prop_map(Op::Remove),
        "[a-z]{1,8}".prop_map(Op::Rename),
    ]
}

fn to_command(op: Op) -> Command {
    match op {
        Op::Add(i, x, y) => Command::AddElement(create_shape_element(format!("el-{i}"), Pos2::new(x, y), None)),
        Op::Move(i, x, y) => Command::UpdateElement {
            id: format!("el-{i}"),
            patch: ElementPatch::position(Pos2::new(x, y)),
        },
        Op::Rotate(i, deg) => Command::UpdateElement {
            id: format!("el-{i}"),
            patch: ElementPatch::rotation(deg),
        },
        Op::Remove(i) => Command::RemoveElement(format!("el-{i}")),
        Op::Rename(name) => Command::UpdateTemplateProperty(TemplateProperty::Name(name)),
    }
}

proptest! {
    #[test]
    fn undoing_everything_restores_the_loaded_template(ops in prop::collection::vec(op(), 1..30)) {
        let mut state = loaded_state();
        let original = state.template().cloned();

        for op in ops {
            state.dispatch(to_command(op));
        }
        let edited = state.template().cloned();

        while state.can_undo() {
            state.dispatch(Command::Undo);
        }
        prop_assert_eq!(state.template().cloned(), original);

        while state.can_redo() {
            state.dispatch(Command::Redo);
        }
        prop_assert_eq!(state.template().cloned(), edited);
    }

    #[test]
    fn rotation_always_lands_in_range(deg in -10_000.0f32..10_000.0) {
        let mut state = loaded_state();
        state.dispatch(Command::AddElement(create_shape_element("a", Pos2::ZERO, None)));
        state.dispatch(Command::UpdateElement { id: "a".to_owned(), patch: ElementPatch::rotation(deg) });
        let rotation = state.selected_element().map(|e| e.rotation()).unwrap_or(-1.0);
        prop_assert!((0.0..360.0).contains(&rotation));
    }
}
