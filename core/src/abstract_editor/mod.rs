//! Abstract editor framework for reversible editing operations.
//!
//! This module provides the foundational traits and types for building
//! an undo/redo-capable editor system. It is decoupled from specific
//! editable types (scene graphs, documents) so that higher-level crates
//! can implement concrete commands.
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: an edit operation (Command pattern)
//! - [`EditActionHistory`]: undo/redo stack managing action sequences
//!
//! # Recording
//!
//! Editors mutate their target first and describe the mutation afterwards.
//! [`EditActionHistory::push`] records that description without applying
//! it again.

mod action;
mod history;

pub use action::{AsAny, EditAction, EditActionError, EditActionResult, Editable};
pub use history::{DEFAULT_MAX_UNDO, EditActionHistory};
