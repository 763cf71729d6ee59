//! Batches per-graphic attribute changes into one undoable command.
//!
//! A [`Transaction`] collects a `before` snapshot per graphic (first write
//! wins per key) and an `after` snapshot per graphic (last write wins per
//! key). [`Transaction::commit`] turns every graphic that has both into one
//! [`SceneCommand`] and pushes it onto the history.
//!
//! # Ordering
//!
//! `record_old` must run before the graphic is mutated, and `update` after.
//! [`Transaction::record_mutation`] performs all three steps in order and is
//! the preferred entry point. Calling `update` for a graphic that was never
//! recorded trips a debug assertion.
//!
//! ```ignore
//! let mut tx = Transaction::new();
//! for &id in ids {
//!     tx.record_mutation(&mut scene, id, &[AttrKey::Width], |scene| {
//!         scene.get_mut(id).unwrap().update_attrs(&width);
//!     });
//! }
//! tx.update_parent_size(&mut scene, ids);
//! tx.commit("Update Width of Elements", &mut history);
//! ```

use std::cmp::Reverse;

use indexmap::IndexMap;
use vellum_core::abstract_editor::EditActionHistory;
use vellum_scene::{AttrKey, Attrs, Capabilities, GraphicId, Scene};

use crate::command::{AttrPatch, SceneCommand, SetGraphicsAttrs};

/// Attributes a container rewrites when it refits to its children.
const FIT_KEYS: [AttrKey; 3] = [AttrKey::Transform, AttrKey::Width, AttrKey::Height];

/// Builder for one atomic, undoable scene edit.
///
/// Not reusable: [`commit`](Self::commit) consumes it.
#[derive(Debug, Default)]
pub struct Transaction {
    before: IndexMap<GraphicId, Attrs>,
    after: IndexMap<GraphicId, Attrs>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records pre-mutation values of `id`. Keys already recorded for `id`
    /// in this transaction keep their first value.
    pub fn record_old(&mut self, id: GraphicId, attrs: Attrs) {
        self.before.entry(id).or_default().merge_missing(attrs);
    }

    /// Records post-mutation values of `id`, replacing earlier ones.
    pub fn update(&mut self, id: GraphicId, attrs: Attrs) {
        debug_assert!(
            self.before.contains_key(&id),
            "update for {id} without a prior record_old"
        );
        self.after.entry(id).or_default().merge_overwrite(attrs);
    }

    /// Captures `keys` of `id`, runs `mutate`, then captures `keys` again.
    ///
    /// Returns `false` without running `mutate` if `id` is not in the scene.
    pub fn record_mutation<F>(
        &mut self,
        scene: &mut Scene,
        id: GraphicId,
        keys: &[AttrKey],
        mutate: F,
    ) -> bool
    where
        F: FnOnce(&mut Scene),
    {
        let Some(graphic) = scene.get(id) else {
            return false;
        };
        self.record_old(id, Attrs::capture(graphic, keys));
        mutate(scene);
        match scene.get(id) {
            Some(graphic) => {
                self.update(id, Attrs::capture(graphic, keys));
                true
            }
            None => false,
        }
    }

    /// Refits every resize-to-fit ancestor of `ids` after their geometry
    /// changed, folding the ancestors' changes into this transaction.
    ///
    /// Ancestors are refit deepest first so nested containers settle before
    /// their parents. An ancestor whose bounds did not change contributes
    /// nothing to the command.
    pub fn update_parent_size(&mut self, scene: &mut Scene, ids: &[GraphicId]) {
        let mut containers: Vec<GraphicId> = Vec::new();
        for &id in ids {
            for ancestor in scene.ancestors(id) {
                if !containers.contains(&ancestor) {
                    containers.push(ancestor);
                }
            }
        }
        containers.sort_by_key(|&id| Reverse(scene.depth(id)));

        for container in containers {
            let Some(graphic) = scene.get(container) else {
                continue;
            };
            if !graphic.kind().supports(Capabilities::RESIZE_TO_FIT) {
                continue;
            }
            let children = graphic.children().to_vec();

            self.record_old(container, Attrs::capture(graphic, &FIT_KEYS));
            for &child in &children {
                if let Some(g) = scene.get(child) {
                    self.record_old(child, Attrs::capture(g, &[AttrKey::Transform]));
                }
            }

            if !scene.resize_to_fit(container) {
                continue;
            }
            log::trace!("refit {container} to its children");

            if let Some(g) = scene.get(container) {
                self.update(container, Attrs::capture(g, &FIT_KEYS));
            }
            for child in children {
                let Some(g) = scene.get(child) else {
                    continue;
                };
                let now = Attrs::capture(g, &[AttrKey::Transform]);
                if self.after.contains_key(&child) || self.differs_from_recorded(child, &now) {
                    self.update(child, now);
                }
            }
        }
    }

    fn differs_from_recorded(&self, id: GraphicId, now: &Attrs) -> bool {
        let Some(before) = self.before.get(&id) else {
            return true;
        };
        now.iter().any(|(&key, value)| before.get(key) != Some(value))
    }

    /// Graphics that currently have both a before and an after snapshot.
    pub fn targets(&self) -> Vec<GraphicId> {
        self.before
            .keys()
            .filter(|id| self.after.contains_key(*id))
            .copied()
            .collect()
    }

    /// Builds the command without pushing it. `None` if nothing was updated.
    pub fn into_command(self, label: &str) -> Option<SetGraphicsAttrs> {
        let Self { before, mut after } = self;
        let patches: Vec<AttrPatch> = before
            .into_iter()
            .filter_map(|(id, mut before)| {
                let mut after = after.swap_remove(&id)?;
                before.retain_keys(&after);
                after.retain_keys(&before);
                (!after.is_empty()).then_some(AttrPatch { id, before, after })
            })
            .collect();
        (!patches.is_empty()).then(|| SetGraphicsAttrs::new(label, patches))
    }

    /// Builds the command and pushes it onto `history`.
    ///
    /// Returns `false`, pushing nothing, if no graphic was updated.
    pub fn commit(self, label: &str, history: &mut EditActionHistory<Scene>) -> bool {
        match self.into_command(label) {
            Some(cmd) => {
                log::debug!("{label}: recorded {} graphic(s)", cmd.patches().len());
                history.push(Box::new(SceneCommand::from(cmd)));
                true
            }
            None => {
                log::debug!("{label}: nothing changed, no command recorded");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::abstract_editor::DEFAULT_MAX_UNDO;
    use vellum_scene::{AttrValue, GraphicBuilder, GraphicKind};

    use super::*;

    fn width(v: f64) -> Attrs {
        Attrs::new().with(AttrKey::Width, v)
    }

    fn set_width(scene: &mut Scene, id: GraphicId, v: f64) {
        scene.get_mut(id).unwrap().update_attrs(&width(v));
    }

    #[test]
    fn record_old_is_first_write_wins() {
        let mut tx = Transaction::new();
        let mut scene = Scene::new();
        let id = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);

        tx.record_old(id, width(1.0));
        tx.record_old(id, width(2.0));
        tx.update(id, width(3.0));

        let cmd = tx.into_command("Width").unwrap();
        assert_eq!(
            cmd.patch(id).unwrap().before.get(AttrKey::Width),
            Some(&AttrValue::Number(1.0))
        );
    }

    #[test]
    fn update_is_last_write_wins() {
        let mut tx = Transaction::new();
        let mut scene = Scene::new();
        let id = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);

        tx.record_old(id, width(1.0));
        tx.update(id, width(2.0));
        tx.update(id, width(3.0));

        let cmd = tx.into_command("Width").unwrap();
        assert_eq!(
            cmd.patch(id).unwrap().after.get(AttrKey::Width),
            Some(&AttrValue::Number(3.0))
        );
    }

    #[test]
    fn record_only_graphic_is_dropped() {
        let mut scene = Scene::new();
        let a = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);
        let b = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);

        let mut tx = Transaction::new();
        tx.record_old(a, width(1.0));
        tx.record_old(b, width(1.0));
        tx.update(b, width(5.0));
        assert_eq!(tx.targets(), vec![b]);

        let cmd = tx.into_command("Width").unwrap();
        assert_eq!(cmd.targets(), vec![b]);
    }

    #[test]
    fn keys_are_intersected() {
        let mut scene = Scene::new();
        let id = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);

        let mut tx = Transaction::new();
        tx.record_old(id, width(1.0).with(AttrKey::Height, 1.0));
        tx.update(id, width(2.0));

        let cmd = tx.into_command("Width").unwrap();
        let patch = cmd.patch(id).unwrap();
        assert!(patch.before.same_keys(&patch.after));
        assert!(!patch.before.contains_key(AttrKey::Height));
    }

    #[test]
    fn empty_commit_pushes_nothing() {
        let mut history = EditActionHistory::new(DEFAULT_MAX_UNDO);
        let mut scene = Scene::new();
        let id = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);

        let mut tx = Transaction::new();
        tx.record_old(id, width(1.0));
        assert!(!tx.commit("Nothing", &mut history));
        assert!(!Transaction::new().commit("Nothing", &mut history));
        assert_eq!(history.undo_count(), 0);
    }

    #[test]
    fn record_mutation_captures_both_sides() {
        let mut history = EditActionHistory::new(DEFAULT_MAX_UNDO);
        let mut scene = Scene::new();
        let id = scene.add(GraphicBuilder::new(GraphicKind::Rect).size(10.0, 10.0), None);

        let mut tx = Transaction::new();
        assert!(tx.record_mutation(&mut scene, id, &[AttrKey::Width], |scene| {
            set_width(scene, id, 40.0);
        }));
        assert!(tx.commit("Width", &mut history));
        assert_eq!(scene.get(id).unwrap().width(), 40.0);

        history.undo(&mut scene).unwrap();
        assert_eq!(scene.get(id).unwrap().width(), 10.0);
        history.redo(&mut scene).unwrap();
        assert_eq!(scene.get(id).unwrap().width(), 40.0);
    }

    #[test]
    fn record_mutation_skips_missing_graphic() {
        let mut scene = Scene::new();
        let id = scene.add(GraphicBuilder::new(GraphicKind::Rect), None);
        scene.remove(id);

        let mut tx = Transaction::new();
        let mut ran = false;
        assert!(!tx.record_mutation(&mut scene, id, &[AttrKey::Width], |_| ran = true));
        assert!(!ran);
        assert!(tx.into_command("Width").is_none());
    }

    #[test]
    fn parent_refit_joins_the_same_command() {
        let mut history = EditActionHistory::new(DEFAULT_MAX_UNDO);
        let mut scene = Scene::new();
        let frame = scene.add(GraphicBuilder::new(GraphicKind::Frame).size(50.0, 50.0), None);
        let child = scene.add(
            GraphicBuilder::new(GraphicKind::Rect).size(50.0, 50.0),
            Some(frame),
        );

        let mut tx = Transaction::new();
        tx.record_mutation(&mut scene, child, &[AttrKey::Width], |scene| {
            set_width(scene, child, 120.0);
        });
        tx.update_parent_size(&mut scene, &[child]);
        let cmd = tx.into_command("Width").unwrap();
        assert_eq!(cmd.targets(), vec![child, frame]);
        assert_eq!(
            cmd.patch(frame).unwrap().before.get(AttrKey::Width),
            Some(&AttrValue::Number(50.0))
        );
        assert_eq!(
            cmd.patch(frame).unwrap().after.get(AttrKey::Width),
            Some(&AttrValue::Number(120.0))
        );

        history.push(Box::new(SceneCommand::from(cmd)));
        history.undo(&mut scene).unwrap();
        assert_eq!(scene.get(child).unwrap().width(), 50.0);
        assert_eq!(scene.get(frame).unwrap().width(), 50.0);
    }

    #[test]
    fn unchanged_parent_is_not_recorded() {
        let mut scene = Scene::new();
        let frame = scene.add(GraphicBuilder::new(GraphicKind::Frame).size(100.0, 100.0), None);
        let big = scene.add(
            GraphicBuilder::new(GraphicKind::Rect).size(100.0, 100.0),
            Some(frame),
        );
        let small = scene.add(
            GraphicBuilder::new(GraphicKind::Rect).size(10.0, 10.0),
            Some(frame),
        );

        let mut tx = Transaction::new();
        tx.record_mutation(&mut scene, small, &[AttrKey::Width], |scene| {
            set_width(scene, small, 20.0);
        });
        tx.update_parent_size(&mut scene, &[small]);
        let cmd = tx.into_command("Width").unwrap();
        assert_eq!(cmd.targets(), vec![small]);
        assert!(cmd.patch(big).is_none());
    }

    #[test]
    fn origin_shift_records_sibling_transforms() {
        let mut history = EditActionHistory::new(DEFAULT_MAX_UNDO);
        let mut scene = Scene::new();
        let frame = scene.add(
            GraphicBuilder::new(GraphicKind::Frame)
                .position(100.0, 100.0)
                .size(60.0, 60.0),
            None,
        );
        let moved = scene.add(
            GraphicBuilder::new(GraphicKind::Rect).size(10.0, 10.0),
            Some(frame),
        );
        let sibling = scene.add(
            GraphicBuilder::new(GraphicKind::Rect)
                .position(50.0, 50.0)
                .size(10.0, 10.0),
            Some(frame),
        );
        let sibling_world = scene.world_transform(sibling).unwrap();

        let mut tx = Transaction::new();
        tx.record_mutation(&mut scene, moved, &[AttrKey::Transform], |scene| {
            let mut tf = scene.world_transform(moved).unwrap();
            tf[4] = 130.0;
            tf[5] = 130.0;
            scene.set_world_transform(moved, tf);
        });
        tx.update_parent_size(&mut scene, &[moved]);
        assert!(tx.commit("Move", &mut history));

        assert_eq!(scene.world_transform(sibling).unwrap(), sibling_world);
        assert_eq!(scene.get(frame).unwrap().transform()[4], 130.0);

        history.undo(&mut scene).unwrap();
        assert_eq!(scene.get(frame).unwrap().transform()[4], 100.0);
        assert_eq!(scene.get(frame).unwrap().width(), 60.0);
        assert_eq!(scene.world_transform(sibling).unwrap(), sibling_world);
        assert_eq!(scene.world_transform(moved).unwrap()[4], 100.0);
    }

    #[test]
    fn nested_frames_refit_inside_out() {
        let mut scene = Scene::new();
        let outer = scene.add(GraphicBuilder::new(GraphicKind::Frame).size(10.0, 10.0), None);
        let inner = scene.add(
            GraphicBuilder::new(GraphicKind::Frame).size(10.0, 10.0),
            Some(outer),
        );
        let leaf = scene.add(
            GraphicBuilder::new(GraphicKind::Rect).size(10.0, 10.0),
            Some(inner),
        );

        let mut tx = Transaction::new();
        tx.record_mutation(&mut scene, leaf, &[AttrKey::Height], |scene| {
            scene
                .get_mut(leaf)
                .unwrap()
                .update_attrs(&Attrs::new().with(AttrKey::Height, 75.0));
        });
        tx.update_parent_size(&mut scene, &[leaf]);

        assert_eq!(scene.get(inner).unwrap().height(), 75.0);
        assert_eq!(scene.get(outer).unwrap().height(), 75.0);
        let cmd = tx.into_command("Height").unwrap();
        assert_eq!(cmd.targets(), vec![leaf, inner, outer]);
    }
}
