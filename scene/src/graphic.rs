//! Graphic elements stored in a [`Scene`](crate::Scene).

use std::f64::consts::{PI, TAU};
use std::fmt;

use vellum_core::math::{Affine, IDENTITY, Point2, affine_from_translation};

use crate::attrs::{AttrKey, AttrValue, Attrs};
use crate::kind::{Capabilities, GraphicKind};

/// Largest vertex count that still gets a derived outline. Counts above it
/// are stored but leave the outline empty, like counts below 3.
pub const MAX_OUTLINE_COUNT: u32 = 1024;

/// Stable identifier of a graphic within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphicId(pub(crate) u32);

impl fmt::Display for GraphicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One editable shape or container node.
///
/// Kind-specific parameters (corner radius, vertex count, inner scale) are
/// stored for every graphic but only readable and writable through
/// [`attr`](Self::attr) / [`update_attrs`](Self::update_attrs) when the kind
/// advertises the matching [`Capabilities`].
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    pub(crate) id: GraphicId,
    kind: GraphicKind,
    object_name: String,
    transform: Affine,
    width: f64,
    height: f64,
    corner_radius: f64,
    count: u32,
    star_inner_scale: f64,
    visible: bool,
    lock: bool,
    pub(crate) parent: Option<GraphicId>,
    pub(crate) children: Vec<GraphicId>,
    /// Derived outline of polygon and star graphics, in local space.
    outline: Vec<Point2>,
}

impl Graphic {
    pub fn id(&self) -> GraphicId {
        self.id
    }

    pub fn kind(&self) -> GraphicKind {
        self.kind
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// Returns `true` if this graphic can hold `key`.
    pub fn supports(&self, key: AttrKey) -> bool {
        key.capability()
            .is_none_or(|capability| self.kind.supports(capability))
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Local transform relative to the parent.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_locked(&self) -> bool {
        self.lock
    }

    pub fn parent(&self) -> Option<GraphicId> {
        self.parent
    }

    pub fn children(&self) -> &[GraphicId] {
        &self.children
    }

    /// Outline vertices in local space. Empty for kinds without one.
    pub fn outline(&self) -> &[Point2] {
        &self.outline
    }

    /// Current value of `key`, or `None` if the kind does not support it.
    pub fn attr(&self, key: AttrKey) -> Option<AttrValue> {
        if !self.supports(key) {
            return None;
        }
        let value = match key {
            AttrKey::Transform => AttrValue::Transform(self.transform),
            AttrKey::Width => AttrValue::Number(self.width),
            AttrKey::Height => AttrValue::Number(self.height),
            AttrKey::CornerRadius => AttrValue::Number(self.corner_radius),
            AttrKey::Count => AttrValue::Count(self.count),
            AttrKey::StarInnerScale => AttrValue::Number(self.star_inner_scale),
            AttrKey::Visible => AttrValue::Bool(self.visible),
            AttrKey::Lock => AttrValue::Bool(self.lock),
            AttrKey::ObjectName => AttrValue::Text(self.object_name.clone()),
        };
        Some(value)
    }

    /// Writes every supported entry of `attrs`, then refreshes derived
    /// geometry.
    ///
    /// Unsupported keys and values of the wrong type are skipped.
    pub fn update_attrs(&mut self, attrs: &Attrs) {
        let mut geometry_changed = false;
        for (&key, value) in attrs {
            if !self.supports(key) {
                log::warn!("{} {} has no attribute {key}", self.kind, self.id);
                continue;
            }
            if !self.set_attr(key, value) {
                log::warn!(
                    "{} {}: mismatched value for {key}: {value:?}",
                    self.kind,
                    self.id
                );
                continue;
            }
            geometry_changed |= matches!(
                key,
                AttrKey::Width | AttrKey::Height | AttrKey::Count | AttrKey::StarInnerScale
            );
        }
        if geometry_changed {
            self.refresh_outline();
        }
    }

    fn set_attr(&mut self, key: AttrKey, value: &AttrValue) -> bool {
        match (key, value) {
            (AttrKey::Transform, AttrValue::Transform(tf)) => self.transform = *tf,
            (AttrKey::Width, AttrValue::Number(v)) => self.width = *v,
            (AttrKey::Height, AttrValue::Number(v)) => self.height = *v,
            (AttrKey::CornerRadius, AttrValue::Number(v)) => self.corner_radius = *v,
            (AttrKey::Count, AttrValue::Count(v)) => self.count = *v,
            (AttrKey::StarInnerScale, AttrValue::Number(v)) => self.star_inner_scale = *v,
            (AttrKey::Visible, AttrValue::Bool(v)) => self.visible = *v,
            (AttrKey::Lock, AttrValue::Bool(v)) => self.lock = *v,
            (AttrKey::ObjectName, AttrValue::Text(v)) => self.object_name.clone_from(v),
            _ => return false,
        }
        true
    }

    fn refresh_outline(&mut self) {
        if self.count > MAX_OUTLINE_COUNT
            && matches!(self.kind, GraphicKind::RegularPolygon | GraphicKind::Star)
        {
            log::warn!(
                "{} {}: count {} exceeds {MAX_OUTLINE_COUNT}, outline skipped",
                self.kind,
                self.id,
                self.count
            );
        }
        self.outline = match self.kind {
            GraphicKind::RegularPolygon => polygon_outline(self.width, self.height, self.count, None),
            GraphicKind::Star => polygon_outline(
                self.width,
                self.height,
                self.count,
                Some(self.star_inner_scale),
            ),
            _ => Vec::new(),
        };
    }
}

/// Vertices inscribed in the `width` x `height` box, starting at the top.
///
/// With `inner_scale`, inner vertices at that radius ratio are interleaved
/// between the outer ones.
fn polygon_outline(width: f64, height: f64, count: u32, inner_scale: Option<f64>) -> Vec<Point2> {
    if !(3..=MAX_OUTLINE_COUNT).contains(&count) {
        return Vec::new();
    }
    let (cx, cy) = (width / 2.0, height / 2.0);
    let step = TAU / f64::from(count);
    let start = -PI / 2.0;
    let mut points = Vec::with_capacity(count as usize * if inner_scale.is_some() { 2 } else { 1 });
    for i in 0..count {
        let angle = start + step * f64::from(i);
        points.push(Point2::new(cx + cx * angle.cos(), cy + cy * angle.sin()));
        if let Some(scale) = inner_scale {
            let inner = angle + step / 2.0;
            points.push(Point2::new(
                cx + cx * scale * inner.cos(),
                cy + cy * scale * inner.sin(),
            ));
        }
    }
    points
}

/// Describes a graphic to add to a scene.
///
/// ```ignore
/// let star = scene.add(
///     GraphicBuilder::new(GraphicKind::Star).size(100.0, 100.0).count(5),
///     Some(frame),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GraphicBuilder {
    kind: GraphicKind,
    object_name: Option<String>,
    transform: Affine,
    width: f64,
    height: f64,
    corner_radius: f64,
    count: u32,
    star_inner_scale: f64,
    visible: bool,
    lock: bool,
}

impl GraphicBuilder {
    pub fn new(kind: GraphicKind) -> Self {
        Self {
            kind,
            object_name: None,
            transform: IDENTITY,
            width: 100.0,
            height: 100.0,
            corner_radius: 0.0,
            count: 3,
            star_inner_scale: 0.382,
            visible: true,
            lock: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    /// Local translation relative to the parent.
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.transform = affine_from_translation(x, y);
        self
    }

    pub fn transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn star_inner_scale(mut self, scale: f64) -> Self {
        self.star_inner_scale = scale;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn locked(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    pub(crate) fn build(self, id: GraphicId, parent: Option<GraphicId>) -> Graphic {
        let object_name = self
            .object_name
            .unwrap_or_else(|| format!("{} {}", self.kind, id.0));
        let mut graphic = Graphic {
            id,
            kind: self.kind,
            object_name,
            transform: self.transform,
            width: self.width,
            height: self.height,
            corner_radius: self.corner_radius,
            count: self.count,
            star_inner_scale: self.star_inner_scale,
            visible: self.visible,
            lock: self.lock,
            parent,
            children: Vec::new(),
            outline: Vec::new(),
        };
        graphic.refresh_outline();
        graphic
    }
}
