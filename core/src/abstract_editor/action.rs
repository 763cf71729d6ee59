//! Editable targets and reversible editor actions.
//!
//! This module defines the core abstractions for an undo/redo editor system:
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: a reversible edit operation (Command pattern)
//! - [`EditActionError`] / [`EditActionResult`]: error handling for history operations
//!
//! EditActions are self-contained: each implementation internally stores whatever
//! data it needs (target identifiers, before/after attribute snapshots, etc.).

use std::any::Any;
use std::fmt;

/// Downcasting support for action trait objects.
///
/// Implemented for every `'static` type, so callers holding a
/// `&dyn EditAction<T>` can recover the concrete action. Call it on the
/// trait object, not on the `Box` holding it.
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marker trait for types that serve as editing targets.
///
/// Implement this on any type that actions can operate on: a scene graph,
/// a document, a texture, etc.
///
/// # Example
///
/// ```ignore
/// struct MyScene { /* ... */ }
/// impl Editable for MyScene {}
/// ```
pub trait Editable: 'static {}

/// Error type for action and history failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// Undo was requested with an empty undo stack.
    NothingToUndo,
    /// Redo was requested with an empty redo stack.
    NothingToRedo,
    /// A custom error with a description.
    Custom(String),
}

impl fmt::Display for EditActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EditActionError {}

/// Result type for action operations.
pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// A reversible editor action (Command pattern).
///
/// EditActions encapsulate a single logical edit and capture enough state to
/// undo the change and redo it. Each implementation stores its own data
/// internally.
///
/// # Object Safety
///
/// This trait is dyn-compatible so that different action types can be stored
/// in a single [`EditActionHistory`](super::EditActionHistory) undo/redo stack as
/// `Box<dyn EditAction<T>>`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct MoveGraphic {
///     id: GraphicId,
///     old_x: f64,
///     new_x: f64,
/// }
///
/// impl EditAction<Scene> for MoveGraphic {
///     fn apply(&mut self, target: &mut Scene) -> EditActionResult {
///         target.set_x(self.id, self.new_x);
///         Ok(())
///     }
///
///     fn undo(&mut self, target: &mut Scene) -> EditActionResult {
///         target.set_x(self.id, self.old_x);
///         Ok(())
///     }
///
///     fn description(&self) -> &str {
///         "Move graphic"
///     }
/// }
/// ```
pub trait EditAction<T: Editable>: fmt::Debug + AsAny + Send {
    /// Applies the action to the target (forward / redo direction).
    fn apply(&mut self, target: &mut T) -> EditActionResult;

    /// Reverses the action (undo direction).
    ///
    /// Must restore the target to the state before [`apply`](Self::apply)
    /// was called.
    fn undo(&mut self, target: &mut T) -> EditActionResult;

    /// A short, human-readable description for display in the edit menu.
    ///
    /// Examples: `"Update X of Elements"`, `"Update Rotation"`.
    fn description(&self) -> &str;
}
