use egui::{Context, Modifiers, PointerButton, Pos2, Response};

pub mod shortcuts;

pub use shortcuts::{action_for, ShortcutAction};

/// Pointer input on the canvas, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed over the canvas
    PointerDown { position: Pos2, modifiers: Modifiers },
    /// Pointer moved while the primary button is held after a canvas press
    PointerMove { position: Pos2, modifiers: Modifiers },
    /// Primary button was released after a canvas press
    PointerUp { position: Pos2 },
    DoubleClick { position: Pos2 },
    /// Pointer is over the canvas without a button held
    Hover { position: Pos2 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match *self {
            InputEvent::PointerDown { position, .. }
            | InputEvent::PointerMove { position, .. }
            | InputEvent::PointerUp { position }
            | InputEvent::DoubleClick { position }
            | InputEvent::Hover { position } => position,
        }
    }
}

/// Turns raw egui pointer state for the canvas widget into [`InputEvent`]s.
///
/// A press is captured when it starts over the canvas, so moves and the release are
/// reported even if the pointer leaves the canvas mid-drag.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    captured: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Process this frame's input for the canvas `response`
    pub fn process_response(&mut self, response: &Response, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let Some(position) = input.pointer.interact_pos() else {
                return;
            };
            let modifiers = input.modifiers;

            if response.hovered() && input.pointer.button_pressed(PointerButton::Primary) {
                self.captured = true;
                events.push(InputEvent::PointerDown { position, modifiers });
            } else if self.captured && Some(position) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove { position, modifiers });
            } else if !self.captured && response.hovered() && Some(position) != self.last_pointer_pos {
                events.push(InputEvent::Hover { position });
            }

            if self.captured && input.pointer.button_released(PointerButton::Primary) {
                self.captured = false;
                events.push(InputEvent::PointerUp { position });
            }

            self.last_pointer_pos = Some(position);
        });

        if response.double_clicked() {
            if let Some(position) = response.interact_pointer_pos() {
                events.push(InputEvent::DoubleClick { position });
            }
        }

        events
    }
}
