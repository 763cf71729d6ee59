//! Graphic kinds and the optional attribute groups they support.

use std::fmt;

bitflags::bitflags! {
    /// Optional attribute groups a graphic kind supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Rounded corners (`corner_radius`).
        const CORNER_RADIUS = 1 << 0;
        /// Vertex or point count (`count`).
        const VERTEX_COUNT = 1 << 1;
        /// Inner radius ratio of a star (`star_inner_scale`).
        const INNER_SCALE = 1 << 2;
        /// Width, height and origin follow the union of the children's bounds.
        const RESIZE_TO_FIT = 1 << 3;
    }
}

/// Runtime variant of a graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicKind {
    Rect,
    Ellipse,
    RegularPolygon,
    Star,
    /// Container that wraps its children.
    Frame,
}

impl GraphicKind {
    /// Attribute groups this kind advertises.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Rect => Capabilities::CORNER_RADIUS,
            Self::Ellipse => Capabilities::empty(),
            Self::RegularPolygon => Capabilities::VERTEX_COUNT,
            Self::Star => Capabilities::VERTEX_COUNT.union(Capabilities::INNER_SCALE),
            Self::Frame => Capabilities::RESIZE_TO_FIT,
        }
    }

    pub fn supports(self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "Rect",
            Self::Ellipse => "Ellipse",
            Self::RegularPolygon => "RegularPolygon",
            Self::Star => "Star",
            Self::Frame => "Frame",
        }
    }
}

impl fmt::Display for GraphicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
