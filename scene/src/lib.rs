//! # Vellum Scene
//!
//! The scene graph edited by the Vellum editor.
//!
//! - [`Scene`]: owns [`Graphic`]s, their hierarchy and world-space geometry
//! - [`GraphicKind`] / [`Capabilities`]: runtime variants and the optional
//!   attribute groups each one supports
//! - [`Attrs`]: owned attribute snapshots used for before/after capture

mod attrs;
mod graphic;
mod kind;
mod scene;

pub use attrs::{AttrKey, AttrValue, Attrs};
pub use graphic::{Graphic, GraphicBuilder, GraphicId, MAX_OUTLINE_COUNT};
pub use kind::{Capabilities, GraphicKind};
pub use scene::Scene;
