//! Undo/redo action history.
//!
//! [`EditActionHistory`] keeps a linear undo/redo stack of [`EditAction`]
//! trait objects. Recording a new action after an undo discards the redo
//! tail.

use std::collections::VecDeque;
use std::fmt;

use super::action::{EditAction, EditActionError, EditActionResult, Editable};

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Linear undo/redo stack of recorded actions.
///
/// Actions are recorded after their effect is already on the target, so
/// [`push`](Self::push) never applies anything. The undo stack is bounded by
/// `max_undo`; the oldest action falls off the front.
///
/// ```ignore
/// let mut history = EditActionHistory::new(50);
/// scene.get_mut(id).unwrap().update_attrs(&after);
/// history.push(Box::new(command));
///
/// history.undo(&mut scene)?;
/// history.redo(&mut scene)?;
/// ```
pub struct EditActionHistory<T: Editable> {
    undo_stack: VecDeque<Box<dyn EditAction<T>>>,
    redo_stack: Vec<Box<dyn EditAction<T>>>,
    max_undo: usize,
}

impl<T: Editable> EditActionHistory<T> {
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
        }
    }

    /// Records an action whose effect is already present on the target and
    /// clears the redo stack.
    pub fn push(&mut self, action: Box<dyn EditAction<T>>) {
        log::trace!("history push: {}", action.description());
        self.redo_stack.clear();
        self.undo_stack.push_back(action);
        while self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
    }

    /// Undoes the most recent action.
    ///
    /// An action whose undo fails stays on the undo stack.
    pub fn undo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self
            .undo_stack
            .pop_back()
            .ok_or(EditActionError::NothingToUndo)?;
        if let Err(e) = action.undo(target) {
            self.undo_stack.push_back(action);
            return Err(e);
        }
        self.redo_stack.push(action);
        Ok(())
    }

    /// Reapplies the most recently undone action.
    ///
    /// An action whose redo fails stays on the redo stack.
    pub fn redo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self.redo_stack.pop().ok_or(EditActionError::NothingToRedo)?;
        if let Err(e) = action.apply(target) {
            self.redo_stack.push(action);
            return Err(e);
        }
        self.undo_stack.push_back(action);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The action the next [`undo`](Self::undo) would revert.
    pub fn last_action(&self) -> Option<&dyn EditAction<T>> {
        self.undo_stack.back().map(|a| a.as_ref())
    }

    /// Undo descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|a| a.description())
    }

    /// Redo descriptions, most recent first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|a| a.description())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_undo(&self) -> usize {
        self.max_undo
    }
}

impl<T: Editable> fmt::Debug for EditActionHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditActionHistory")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("max_undo", &self.max_undo)
            .finish()
    }
}
