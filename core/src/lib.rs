//! # Vellum Core
//!
//! Core crate for the Vellum graphics editor: reversible editing
//! abstractions and canvas math.

pub mod abstract_editor;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
