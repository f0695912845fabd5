use std::collections::VecDeque;
use std::sync::Arc;

use crate::element::ElementId;
use crate::template::Template;

/// Default number of undo steps kept before the oldest are dropped
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// The document-level facts restored by undo and redo
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub template: Option<Arc<Template>>,
    pub selected_element_id: Option<ElementId>,
}

/// Coalescing state of a pointer gesture (drag or resize)
#[derive(Debug, Clone, Default, PartialEq)]
enum Gesture {
    #[default]
    Closed,
    /// Opened, but nothing changed yet; holds the state before the gesture
    Pending(Snapshot),
    /// The pre-gesture snapshot has been pushed onto `past`
    Committed,
}

/// Bounded undo/redo stacks of whole-document snapshots.
///
/// Templates are shared through `Arc`, so a snapshot costs one pointer until the
/// live template is next mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    limit: usize,
    gesture: Gesture,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// A limit of zero is raised to one so undo always has at least one step
    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
            gesture: Gesture::Closed,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Past snapshots, most recent last
    pub fn past(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter()
    }

    /// Redo snapshots, next redo last
    pub fn future(&self) -> impl Iterator<Item = &Snapshot> {
        self.future.iter()
    }

    /// Record the state before a mutation. Clears the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Step back: returns the snapshot to restore after stashing `current` for redo
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.reopen_gesture(&previous);
        self.future.push(current);
        Some(previous)
    }

    /// Step forward: returns the snapshot to restore after stashing `current` for undo
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.reopen_gesture(&next);
        self.past.push_back(current);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        Some(next)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.gesture = Gesture::Closed;
    }

    /// An open gesture continues from `restored`, so its remaining changes form one new step
    fn reopen_gesture(&mut self, restored: &Snapshot) {
        if self.gesture_open() {
            self.gesture = Gesture::Pending(restored.clone());
        }
    }

    pub fn gesture_open(&self) -> bool {
        self.gesture != Gesture::Closed
    }

    /// Open a gesture; the snapshot is only pushed once the gesture changes something
    pub fn begin_gesture(&mut self, before: Snapshot) {
        self.gesture = Gesture::Pending(before);
    }

    /// Called before a gesture mutation. Returns true when this is the gesture's first
    /// change, in which case the pre-gesture snapshot has just been pushed.
    pub fn commit_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Pending(before) => {
                self.push(before);
                self.gesture = Gesture::Committed;
                true
            }
            other => {
                self.gesture = other;
                false
            }
        }
    }

    /// Close the gesture. Returns true if it produced an undo step.
    pub fn end_gesture(&mut self) -> bool {
        std::mem::take(&mut self.gesture) == Gesture::Committed
    }
}
