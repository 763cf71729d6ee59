//! Scene commands recorded in the undo/redo history.
//!
//! A [`SceneCommand`] is immutable once built. It stores, per target graphic,
//! the attribute values to write on redo and the values to write on undo.

use vellum_core::abstract_editor::{EditAction, EditActionResult};
use vellum_scene::{Attrs, GraphicId, Scene};

/// Before/after attribute values of one target graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrPatch {
    pub id: GraphicId,
    pub before: Attrs,
    pub after: Attrs,
}

/// Attribute patch over a set of graphics.
#[derive(Debug, Clone, PartialEq)]
pub struct SetGraphicsAttrs {
    label: String,
    patches: Vec<AttrPatch>,
}

impl SetGraphicsAttrs {
    /// Builds a command from per-graphic patches, in target order.
    pub fn new(label: impl Into<String>, patches: Vec<AttrPatch>) -> Self {
        debug_assert!(
            patches.iter().all(|p| p.before.same_keys(&p.after)),
            "before and after snapshots must hold the same keys"
        );
        Self {
            label: label.into(),
            patches,
        }
    }

    /// Builds a command that writes one shared `after` snapshot to every
    /// graphic in `ids`. `before` is index-aligned with `ids`.
    pub fn uniform(
        label: impl Into<String>,
        ids: &[GraphicId],
        after: Attrs,
        before: Vec<Attrs>,
    ) -> Self {
        debug_assert_eq!(ids.len(), before.len(), "one before snapshot per target");
        let patches = ids
            .iter()
            .zip(before)
            .map(|(&id, before)| AttrPatch {
                id,
                before,
                after: after.clone(),
            })
            .collect();
        Self::new(label, patches)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn patches(&self) -> &[AttrPatch] {
        &self.patches
    }

    pub fn patch(&self, id: GraphicId) -> Option<&AttrPatch> {
        self.patches.iter().find(|p| p.id == id)
    }

    pub fn targets(&self) -> Vec<GraphicId> {
        self.patches.iter().map(|p| p.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Writes every `after` snapshot. Graphics missing from the scene are
    /// skipped.
    pub fn apply_forward(&self, scene: &mut Scene) {
        for patch in &self.patches {
            self.write(scene, patch.id, &patch.after);
        }
    }

    /// Writes every `before` snapshot. Graphics missing from the scene are
    /// skipped.
    pub fn apply_inverse(&self, scene: &mut Scene) {
        for patch in self.patches.iter().rev() {
            self.write(scene, patch.id, &patch.before);
        }
    }

    /// The same command with `before` and `after` swapped.
    pub fn inverted(&self) -> Self {
        Self {
            label: self.label.clone(),
            patches: self
                .patches
                .iter()
                .map(|p| AttrPatch {
                    id: p.id,
                    before: p.after.clone(),
                    after: p.before.clone(),
                })
                .collect(),
        }
    }

    fn write(&self, scene: &mut Scene, id: GraphicId, attrs: &Attrs) {
        match scene.get_mut(id) {
            Some(graphic) => graphic.update_attrs(attrs),
            None => log::debug!("{}: graphic {id} no longer exists, skipped", self.label),
        }
    }
}

/// Every command the editor records.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    SetAttrs(SetGraphicsAttrs),
}

impl SceneCommand {
    pub fn label(&self) -> &str {
        match self {
            Self::SetAttrs(cmd) => cmd.label(),
        }
    }

    pub fn targets(&self) -> Vec<GraphicId> {
        match self {
            Self::SetAttrs(cmd) => cmd.targets(),
        }
    }

    pub fn apply_forward(&self, scene: &mut Scene) {
        match self {
            Self::SetAttrs(cmd) => cmd.apply_forward(scene),
        }
    }

    pub fn apply_inverse(&self, scene: &mut Scene) {
        match self {
            Self::SetAttrs(cmd) => cmd.apply_inverse(scene),
        }
    }

    pub fn inverted(&self) -> Self {
        match self {
            Self::SetAttrs(cmd) => Self::SetAttrs(cmd.inverted()),
        }
    }
}

impl From<SetGraphicsAttrs> for SceneCommand {
    fn from(cmd: SetGraphicsAttrs) -> Self {
        Self::SetAttrs(cmd)
    }
}

impl EditAction<Scene> for SceneCommand {
    fn apply(&mut self, target: &mut Scene) -> EditActionResult {
        self.apply_forward(target);
        Ok(())
    }

    fn undo(&mut self, target: &mut Scene) -> EditActionResult {
        self.apply_inverse(target);
        Ok(())
    }

    fn description(&self) -> &str {
        self.label()
    }
}

#[cfg(test)]
mod tests {
    use vellum_scene::{AttrKey, AttrValue, GraphicBuilder, GraphicKind};

    use super::*;

    fn scene_with_rects() -> (Scene, GraphicId, GraphicId) {
        let mut scene = Scene::new();
        let a = scene.add(
            GraphicBuilder::new(GraphicKind::Rect)
                .position(1.0, 2.0)
                .corner_radius(3.0),
            None,
        );
        let b = scene.add(
            GraphicBuilder::new(GraphicKind::Rect)
                .position(4.0, 5.0)
                .corner_radius(6.0),
            None,
        );
        (scene, a, b)
    }

    fn move_command(scene: &Scene, ids: &[GraphicId], x: f64) -> SceneCommand {
        let patches = ids
            .iter()
            .map(|&id| {
                let graphic = scene.get(id).unwrap();
                let mut tf = graphic.transform();
                tf[4] = x;
                AttrPatch {
                    id,
                    before: Attrs::capture(graphic, &[AttrKey::Transform]),
                    after: Attrs::new().with(AttrKey::Transform, tf),
                }
            })
            .collect();
        SetGraphicsAttrs::new("Move", patches).into()
    }

    #[test]
    fn forward_then_inverse_restores_state() {
        let (mut scene, a, b) = scene_with_rects();
        let original_a = scene.get(a).unwrap().clone();
        let original_b = scene.get(b).unwrap().clone();

        let cmd = move_command(&scene, &[a, b], 50.0);
        cmd.apply_forward(&mut scene);
        assert_eq!(scene.get(a).unwrap().transform()[4], 50.0);
        assert_eq!(scene.get(b).unwrap().transform()[4], 50.0);

        cmd.apply_inverse(&mut scene);
        assert_eq!(scene.get(a).unwrap(), &original_a);
        assert_eq!(scene.get(b).unwrap(), &original_b);
    }

    #[test]
    fn forward_is_idempotent() {
        let (mut scene, a, _) = scene_with_rects();
        let cmd = move_command(&scene, &[a], 9.0);
        cmd.apply_forward(&mut scene);
        let once = scene.get(a).unwrap().clone();
        cmd.apply_forward(&mut scene);
        assert_eq!(scene.get(a).unwrap(), &once);
    }

    #[test]
    fn missing_graphic_is_skipped() {
        let (mut scene, a, b) = scene_with_rects();
        let mut cmd = move_command(&scene, &[a, b], 70.0);
        scene.remove(a);

        cmd.apply(&mut scene).unwrap();
        assert_eq!(scene.get(b).unwrap().transform()[4], 70.0);
        cmd.undo(&mut scene).unwrap();
        assert_eq!(scene.get(b).unwrap().transform()[4], 4.0);
        assert!(!scene.contains(a));
    }

    #[test]
    fn uniform_keeps_per_graphic_before() {
        let (mut scene, a, b) = scene_with_rects();
        let before = [a, b]
            .iter()
            .map(|&id| Attrs::capture(scene.get(id).unwrap(), &[AttrKey::CornerRadius]))
            .collect();
        let cmd = SetGraphicsAttrs::uniform(
            "Radius",
            &[a, b],
            Attrs::new().with(AttrKey::CornerRadius, 10.0),
            before,
        );
        assert_eq!(cmd.targets(), vec![a, b]);
        assert_eq!(
            cmd.patch(b).unwrap().before.get(AttrKey::CornerRadius),
            Some(&AttrValue::Number(6.0))
        );

        cmd.apply_forward(&mut scene);
        assert_eq!(
            scene.get(a).unwrap().attr(AttrKey::CornerRadius),
            Some(AttrValue::Number(10.0))
        );
        cmd.apply_inverse(&mut scene);
        assert_eq!(
            scene.get(a).unwrap().attr(AttrKey::CornerRadius),
            Some(AttrValue::Number(3.0))
        );
        assert_eq!(
            scene.get(b).unwrap().attr(AttrKey::CornerRadius),
            Some(AttrValue::Number(6.0))
        );
    }

    #[test]
    fn inverted_swaps_directions() {
        let (mut scene, a, _) = scene_with_rects();
        let cmd = move_command(&scene, &[a], 30.0);
        let inverse = cmd.inverted();
        assert_eq!(inverse.label(), "Move");

        cmd.apply_forward(&mut scene);
        inverse.apply_forward(&mut scene);
        assert_eq!(scene.get(a).unwrap().transform()[4], 1.0);
        assert_eq!(inverse.inverted(), cmd);
    }

    #[test]
    fn description_is_label() {
        let (scene, a, _) = scene_with_rects();
        let cmd = move_command(&scene, &[a], 0.0);
        assert_eq!(EditAction::<Scene>::description(&cmd), "Move");
    }
}
