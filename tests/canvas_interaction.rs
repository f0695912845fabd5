use egui::{Modifiers, Pos2, Vec2};
use template_editor::canvas::{CanvasInteraction, FloatingAction, Gesture};
use template_editor::element::factory::{create_shape_element, create_text_element};
use template_editor::geometry::{resize_rect, ResizeHandle, Viewport};
use template_editor::input::InputEvent;
use template_editor::state::Mode;
use template_editor::{create_empty_template, Command, EditorState, ElementKind};

// Identity viewport: screen points equal template units
fn viewport() -> Viewport {
    Viewport::default()
}

// A template with one 100×100 shape at (100, 100)
fn state_with_shape() -> EditorState {
    let mut template = create_empty_template("invite", "Invitation");
    template
        .elements
        .push(create_shape_element("box", Pos2::new(100.0, 100.0), None));
    let mut state = EditorState::new();
    state.dispatch(Command::LoadTemplate(template));
    state
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        position: Pos2::new(x, y),
        modifiers: Modifiers::NONE,
    }
}

fn drag_to(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        position: Pos2::new(x, y),
        modifiers: Modifiers::NONE,
    }
}

fn up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp {
        position: Pos2::new(x, y),
    }
}

/// Feed events through the interaction and dispatch whatever it produces
fn run(interaction: &mut CanvasInteraction, state: &mut EditorState, events: &[InputEvent]) -> Vec<Command> {
    let mut produced = Vec::new();
    for event in events {
        let commands = interaction.handle_event(event, state, &viewport());
        for command in &commands {
            state.dispatch(command.clone());
        }
        produced.extend(commands);
    }
    produced
}

#[test]
fn drag_is_a_single_undo_step() {
    let mut state = state_with_shape();
    let mut interaction = CanvasInteraction::new();

    run(
        &mut interaction,
        &mut state,
        &[down(150.0, 150.0), drag_to(170.0, 160.0), drag_to(200.0, 200.0)],
    );
    assert!(matches!(interaction.gesture(), Gesture::Dragging { .. }));
    let commands = run(&mut interaction, &mut state, &[up(200.0, 200.0)]);
    assert_eq!(commands, vec![Command::EndGesture]);
    assert_eq!(interaction.gesture(), &Gesture::Idle);

    let moved = state.selected_element().expect("dragged element is selected");
    assert_eq!(moved.position, Pos2::new(150.0, 150.0));
    assert_eq!(state.history().past_len(), 1);

    state.dispatch(Command::Undo);
    let restored = state.template().and_then(|t| t.element("box")).expect("element");
    assert_eq!(restored.position, Pos2::new(100.0, 100.0));
}

#[test]
fn drag_snaps_when_enabled() {
    let mut state = state_with_shape();
    state.dispatch(Command::ToggleSnapToGrid(Some(true)));
    let mut interaction = CanvasInteraction::new();

    run(
        &mut interaction,
        &mut state,
        &[down(150.0, 150.0), drag_to(163.0, 158.0), up(163.0, 158.0)],
    );
    assert_eq!(
        state.selected_element().map(|e| e.position),
        Some(Pos2::new(120.0, 100.0))
    );
}

#[test]
fn click_on_empty_canvas_clears_selection() {
    let mut state = state_with_shape();
    state.dispatch(Command::SelectElement(Some("box".to_owned())));
    let mut interaction = CanvasInteraction::new();

    let commands = run(&mut interaction, &mut state, &[down(500.0, 500.0), up(500.0, 500.0)]);
    assert_eq!(commands, vec![Command::SelectElement(None)]);
    assert_eq!(state.selected_element_id(), None);
    assert!(!state.can_undo());
}

#[test]
fn click_to_place_text_returns_to_select_mode() {
    let mut state = state_with_shape();
    state.dispatch(Command::SetMode(Mode::Text));
    let mut interaction = CanvasInteraction::new();

    run(&mut interaction, &mut state, &[down(400.0, 40.0), up(400.0, 40.0)]);

    assert_eq!(state.mode(), Mode::Select);
    let placed = state.selected_element().expect("placed element is selected");
    assert!(matches!(placed.kind, ElementKind::Text(_)));
    assert_eq!(placed.position, Pos2::new(400.0, 40.0));
}

#[test]
fn shape_mode_places_the_chosen_shape() {
    let mut state = state_with_shape();
    state.dispatch(Command::SetMode(Mode::Shape));
    let mut interaction = CanvasInteraction::new();
    interaction.shape_kind = template_editor::element::ShapeKind::Heart;

    run(&mut interaction, &mut state, &[down(300.0, 300.0)]);
    let placed = state.selected_element().and_then(|e| e.as_shape()).expect("shape placed");
    assert_eq!(placed.shape, template_editor::element::ShapeKind::Heart);
}

#[test]
fn image_mode_requests_a_file_instead_of_adding() {
    let mut state = state_with_shape();
    state.dispatch(Command::SetMode(Mode::Image));
    let mut interaction = CanvasInteraction::new();

    run(&mut interaction, &mut state, &[down(250.0, 260.0)]);
    assert_eq!(interaction.take_image_request(), Some(Pos2::new(250.0, 260.0)));
    assert_eq!(interaction.take_image_request(), None);
    assert_eq!(state.template().map(|t| t.elements.len()), Some(1));
    assert_eq!(state.mode(), Mode::Select);
}

#[test]
fn pan_mode_moves_the_offset_without_commands() {
    let mut state = state_with_shape();
    state.dispatch(Command::SetMode(Mode::Pan));
    let before = state.clone();
    let mut interaction = CanvasInteraction::new();

    let commands = run(
        &mut interaction,
        &mut state,
        &[down(0.0, 0.0), drag_to(30.0, 10.0), drag_to(40.0, 25.0), up(40.0, 25.0)],
    );
    assert!(commands.is_empty());
    assert_eq!(interaction.pan, Vec2::new(40.0, 25.0));
    assert_eq!(state, before);
}

#[test]
fn preview_blocks_every_mutation() {
    let mut state = state_with_shape();
    let mut interaction = CanvasInteraction::new();
    interaction.preview = true;
    let before = state.clone();

    let commands = run(
        &mut interaction,
        &mut state,
        &[
            down(150.0, 150.0),
            drag_to(200.0, 200.0),
            up(200.0, 200.0),
            InputEvent::DoubleClick {
                position: Pos2::new(150.0, 150.0),
            },
        ],
    );
    assert!(commands.is_empty());
    assert!(interaction.text_edit().is_none());
    assert_eq!(state, before);
}

#[test]
fn resize_handle_respects_the_minimum_size() {
    let mut state = state_with_shape();
    state.dispatch(Command::SelectElement(Some("box".to_owned())));
    let mut interaction = CanvasInteraction::new();

    run(
        &mut interaction,
        &mut state,
        &[down(200.0, 200.0), drag_to(0.0, 0.0), up(0.0, 0.0)],
    );
    let resized = state.selected_element().expect("selected");
    assert_eq!(resized.position, Pos2::new(100.0, 100.0));
    assert_eq!(resized.size.width, 20.0);
    assert_eq!(resized.size.height, 20.0);
    assert_eq!(state.history().past_len(), 1);
}

#[test]
fn corner_resize_never_goes_below_the_floor() {
    let start = egui::Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(50.0, 50.0));
    for handle in ResizeHandle::ALL {
        let rect = resize_rect(start, handle, Vec2::new(-400.0, 400.0), 20.0);
        assert!(rect.width() >= 20.0, "{handle:?} width {}", rect.width());
        let rect = resize_rect(start, handle, Vec2::new(400.0, -400.0), 20.0);
        assert!(rect.height() >= 20.0, "{handle:?} height {}", rect.height());
    }
}

#[test]
fn double_click_edits_text_and_confirm_updates_content() {
    let mut template = create_empty_template("t", "Ticket");
    template
        .elements
        .push(create_text_element("title", Pos2::new(10.0, 10.0), Some("Hello".to_owned())));
    let mut state = EditorState::new();
    state.dispatch(Command::LoadTemplate(template));
    let mut interaction = CanvasInteraction::new();

    run(
        &mut interaction,
        &mut state,
        &[InputEvent::DoubleClick {
            position: Pos2::new(20.0, 20.0),
        }],
    );
    let edit = interaction.text_edit_mut().expect("text edit opened");
    assert_eq!(edit.buffer, "Hello");
    edit.buffer = "Welcome".to_owned();

    let command = interaction.confirm_text_edit(&state).expect("content changed");
    state.dispatch(command);
    let text = state
        .template()
        .and_then(|t| t.element("title"))
        .and_then(|e| e.as_text())
        .expect("text element");
    assert_eq!(text.content, "Welcome");
    assert!(interaction.text_edit().is_none());
}

#[test]
fn floating_actions_map_to_commands() {
    let element = create_shape_element("box", Pos2::ZERO, None);
    let mut state = state_with_shape();
    state.dispatch(Command::SelectElement(Some("box".to_owned())));

    for action in [FloatingAction::RotateLeft, FloatingAction::ToggleOpacity] {
        state.dispatch(action.command(state.selected_element().unwrap_or(&element)));
    }
    let selected = state.selected_element().expect("selected");
    assert_eq!(selected.rotation(), 345.0);
    assert_eq!(selected.opacity(), 0.5);

    state.dispatch(FloatingAction::Delete.command(&element));
    assert_eq!(state.selected_element_id(), None);
    assert_eq!(state.template().map(|t| t.elements.len()), Some(0));
}
