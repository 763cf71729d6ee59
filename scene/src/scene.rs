//! The scene graph: graphic storage, hierarchy and world-space geometry.

use std::collections::HashMap;

use vellum_core::abstract_editor::Editable;
use vellum_core::math::{
    Affine, Bounds, IDENTITY, Point2, affine_from_translation, affine_invert, affine_multiply,
    affine_rotate_about, affine_rotation, affine_transform_point,
};

use crate::attrs::{AttrKey, Attrs};
use crate::graphic::{Graphic, GraphicBuilder, GraphicId};
use crate::kind::Capabilities;

/// Owns every graphic and the parent/child relationships between them.
///
/// Each graphic's transform is local to its parent; root graphics are
/// placed directly in canvas space.
#[derive(Debug, Default)]
pub struct Scene {
    graphics: HashMap<GraphicId, Graphic>,
    roots: Vec<GraphicId>,
    next_id: u32,
}

impl Editable for Scene {}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a graphic as the last child of `parent`, or as a root.
    ///
    /// A `parent` that does not exist falls back to a root graphic.
    pub fn add(&mut self, builder: GraphicBuilder, parent: Option<GraphicId>) -> GraphicId {
        let id = GraphicId(self.next_id);
        self.next_id += 1;

        let parent = parent.filter(|p| {
            let exists = self.graphics.contains_key(p);
            if !exists {
                log::warn!("parent {p} not found, adding {id} as a root");
            }
            exists
        });
        match parent.and_then(|p| self.graphics.get_mut(&p)) {
            Some(p) => p.children.push(id),
            None => self.roots.push(id),
        }
        self.graphics.insert(id, builder.build(id, parent));
        id
    }

    /// Removes a graphic together with all of its descendants.
    ///
    /// Returns the removed graphic itself.
    pub fn remove(&mut self, id: GraphicId) -> Option<Graphic> {
        let graphic = self.graphics.remove(&id)?;
        match graphic.parent.and_then(|p| self.graphics.get_mut(&p)) {
            Some(parent) => parent.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
        let mut stack = graphic.children.clone();
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.graphics.remove(&child) {
                stack.extend(removed.children);
            }
        }
        Some(graphic)
    }

    pub fn get(&self, id: GraphicId) -> Option<&Graphic> {
        self.graphics.get(&id)
    }

    pub fn get_mut(&mut self, id: GraphicId) -> Option<&mut Graphic> {
        self.graphics.get_mut(&id)
    }

    pub fn contains(&self, id: GraphicId) -> bool {
        self.graphics.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    pub fn roots(&self) -> &[GraphicId] {
        &self.roots
    }

    pub fn parent_of(&self, id: GraphicId) -> Option<GraphicId> {
        self.graphics.get(&id)?.parent
    }

    pub fn children_of(&self, id: GraphicId) -> &[GraphicId] {
        self.graphics
            .get(&id)
            .map(|g| g.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: GraphicId) -> Vec<GraphicId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent_of(parent);
        }
        ancestors
    }

    /// Number of ancestors above `id`.
    pub fn depth(&self, id: GraphicId) -> usize {
        self.ancestors(id).len()
    }

    /// Canvas-space transform of `id`.
    pub fn world_transform(&self, id: GraphicId) -> Option<Affine> {
        let graphic = self.graphics.get(&id)?;
        let local = graphic.transform();
        Some(match graphic.parent {
            Some(parent) => affine_multiply(&self.parent_world(parent), &local),
            None => local,
        })
    }

    fn parent_world(&self, parent: GraphicId) -> Affine {
        self.world_transform(parent).unwrap_or(IDENTITY)
    }

    /// Places `id` at the given canvas-space transform by rewriting its
    /// local transform.
    ///
    /// Returns `false` if the graphic is missing or its parent transform
    /// cannot be inverted.
    pub fn set_world_transform(&mut self, id: GraphicId, world: Affine) -> bool {
        let Some(graphic) = self.graphics.get(&id) else {
            return false;
        };
        let local = match graphic.parent {
            Some(parent) => {
                let Some(inverse) = affine_invert(&self.parent_world(parent)) else {
                    log::warn!("cannot place {id}: parent {parent} transform is singular");
                    return false;
                };
                affine_multiply(&inverse, &world)
            }
            None => world,
        };
        self.write_transform(id, local);
        true
    }

    /// Sets the canvas-space rotation of `id` (radians), pivoting about its
    /// centre. Scale and skew are preserved.
    pub fn set_rotation(&mut self, id: GraphicId, rotation: f64) -> bool {
        let (Some(world), Some(graphic)) = (self.world_transform(id), self.graphics.get(&id)) else {
            return false;
        };
        let center = affine_transform_point(
            &world,
            Point2::new(graphic.width() / 2.0, graphic.height() / 2.0),
        );
        let delta = rotation - affine_rotation(&world);
        self.set_world_transform(id, affine_rotate_about(&world, delta, center))
    }

    /// Canvas-space bounding box of `id`.
    pub fn world_bounds(&self, id: GraphicId) -> Option<Bounds> {
        let graphic = self.graphics.get(&id)?;
        let world = self.world_transform(id)?;
        Some(Bounds::of_transformed_rect(
            &world,
            graphic.width(),
            graphic.height(),
        ))
    }

    /// Bounds of the visible children of `id`, in the local space of `id`.
    pub fn children_bounds(&self, id: GraphicId) -> Option<Bounds> {
        self.children_of(id)
            .iter()
            .filter_map(|c| self.graphics.get(c))
            .filter(|c| c.is_visible())
            .map(|c| Bounds::of_transformed_rect(&c.transform(), c.width(), c.height()))
            .reduce(|a, b| a.union(&b))
    }

    /// Refits a [`RESIZE_TO_FIT`](Capabilities::RESIZE_TO_FIT) container to
    /// the union of its visible children.
    ///
    /// The container's origin moves to the top-left of that union and its
    /// children are shifted back so nothing moves on the canvas. Hidden
    /// children keep their place but do not contribute to the bounds.
    /// Returns `true` if any attribute changed.
    pub fn resize_to_fit(&mut self, id: GraphicId) -> bool {
        let Some(container) = self.graphics.get(&id) else {
            return false;
        };
        if !container.kind().supports(Capabilities::RESIZE_TO_FIT) {
            return false;
        }
        let Some(bounds) = self.children_bounds(id) else {
            return false;
        };

        let offset = bounds.min;
        let transform = affine_multiply(
            &container.transform(),
            &affine_from_translation(offset.x, offset.y),
        );
        let changed = transform != container.transform()
            || bounds.width() != container.width()
            || bounds.height() != container.height();
        if !changed {
            return false;
        }

        let children = container.children.clone();
        if let Some(container) = self.graphics.get_mut(&id) {
            container.update_attrs(
                &Attrs::new()
                    .with(AttrKey::Transform, transform)
                    .with(AttrKey::Width, bounds.width())
                    .with(AttrKey::Height, bounds.height()),
            );
        }
        if offset != Point2::origin() {
            let shift = affine_from_translation(-offset.x, -offset.y);
            for child in children {
                if let Some(child) = self.graphics.get_mut(&child) {
                    let local = affine_multiply(&shift, &child.transform());
                    child.write_transform(local);
                }
            }
        }
        true
    }

    fn write_transform(&mut self, id: GraphicId, local: Affine) {
        if let Some(graphic) = self.graphics.get_mut(&id) {
            graphic.write_transform(local);
        }
    }
}

impl Graphic {
    fn write_transform(&mut self, local: Affine) {
        self.update_attrs(&Attrs::new().with(AttrKey::Transform, local));
    }
}
