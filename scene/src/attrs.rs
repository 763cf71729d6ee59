//! Attribute keys, values and snapshots.
//!
//! An [`Attrs`] snapshot maps attribute keys to owned values. Snapshots are
//! captured from a [`Graphic`] before and after an edit and written back on
//! undo/redo; every value is a plain copy, so a snapshot never observes later
//! mutation of the graphic it was captured from.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use vellum_core::math::Affine;

use crate::graphic::Graphic;
use crate::kind::Capabilities;

/// Name of an editable graphic attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    /// Local transform relative to the parent.
    Transform,
    Width,
    Height,
    CornerRadius,
    Count,
    StarInnerScale,
    Visible,
    Lock,
    ObjectName,
}

impl AttrKey {
    /// Capability a graphic needs for this key, if any.
    pub const fn capability(self) -> Option<Capabilities> {
        match self {
            Self::CornerRadius => Some(Capabilities::CORNER_RADIUS),
            Self::Count => Some(Capabilities::VERTEX_COUNT),
            Self::StarInnerScale => Some(Capabilities::INNER_SCALE),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Width => "width",
            Self::Height => "height",
            Self::CornerRadius => "cornerRadius",
            Self::Count => "count",
            Self::StarInnerScale => "starInnerScale",
            Self::Visible => "visible",
            Self::Lock => "lock",
            Self::ObjectName => "objectName",
        }
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a graphic attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Transform(Affine),
    Number(f64),
    Count(u32),
    Bool(bool),
    Text(String),
}

impl From<Affine> for AttrValue {
    fn from(tf: Affine) -> Self {
        Self::Transform(tf)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        Self::Count(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Snapshot of a subset of one graphic's attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(BTreeMap<AttrKey, AttrValue>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the named attributes from `graphic`.
    ///
    /// Keys the graphic's kind does not support are left out.
    pub fn capture(graphic: &Graphic, keys: &[AttrKey]) -> Self {
        let mut attrs = Self::new();
        for &key in keys {
            if let Some(value) = graphic.attr(key) {
                attrs.insert(key, value);
            }
        }
        attrs
    }

    /// Builder-style insert.
    pub fn with(mut self, key: AttrKey, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: AttrKey, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key, value.into())
    }

    pub fn get(&self, key: AttrKey) -> Option<&AttrValue> {
        self.0.get(&key)
    }

    pub fn contains_key(&self, key: AttrKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = AttrKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AttrKey, AttrValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copies entries from `other` whose keys are not present yet.
    pub fn merge_missing(&mut self, other: Attrs) {
        for (key, value) in other.0 {
            self.0.entry(key).or_insert(value);
        }
    }

    /// Copies every entry from `other`, replacing existing values.
    pub fn merge_overwrite(&mut self, other: Attrs) {
        self.0.extend(other.0);
    }

    /// Drops every entry whose key `other` does not have.
    pub fn retain_keys(&mut self, other: &Attrs) {
        self.0.retain(|key, _| other.0.contains_key(key));
    }

    /// Returns `true` if both snapshots hold the same set of keys.
    pub fn same_keys(&self, other: &Attrs) -> bool {
        self.0.keys().eq(other.0.keys())
    }
}

impl FromIterator<(AttrKey, AttrValue)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (AttrKey, AttrValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = (&'a AttrKey, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, AttrKey, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
