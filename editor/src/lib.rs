//! # Vellum Editor
//!
//! Undoable editing of a Vellum [`Scene`](vellum_scene::Scene).
//!
//! - [`mutate`]: batch operations over a selection (position, size,
//!   rotation, corner radius, count, inner scale, visibility, lock, name)
//! - [`Transaction`]: before/after capture that becomes one [`SceneCommand`]
//! - [`Editor`]: a scene plus its undo/redo history
//! - [`EditorSettings`]: history depth, loaded from TOML

pub mod command;
mod editor;
pub mod mutate;
pub mod settings;
pub mod transaction;

pub use command::{AttrPatch, SceneCommand, SetGraphicsAttrs};
pub use editor::Editor;
pub use settings::{EditorSettings, HistorySettings, SettingsError, load_settings};
pub use transaction::Transaction;
