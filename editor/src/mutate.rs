//! Batch edits over a selection, each recorded as one undo step.
//!
//! Geometry edits (position, size, rotation) and visibility go through a
//! [`Transaction`] so resize-to-fit ancestors are refit in the same command.
//! Attribute-only edits (corner radius, count, inner scale, lock, name)
//! write one shared value to every capable graphic and push a
//! [`SetGraphicsAttrs`] directly.
//!
//! Every operation is a no-op on an empty selection, and ids that are no
//! longer in the scene are ignored.

use vellum_core::math::{AFFINE_TX, AFFINE_TY};
use vellum_scene::{AttrKey, AttrValue, Attrs, GraphicId, Scene};

use crate::command::SetGraphicsAttrs;
use crate::editor::Editor;
use crate::transaction::Transaction;

pub const LABEL_SET_X: &str = "Update X";
pub const LABEL_SET_Y: &str = "Update Y";
pub const LABEL_SET_WIDTH: &str = "Update Width";
pub const LABEL_SET_HEIGHT: &str = "Update Height";
pub const LABEL_SET_ROTATION: &str = "Update Rotation";
pub const LABEL_SET_CORNER_RADIUS: &str = "Update Corner Radius";
pub const LABEL_SET_COUNT: &str = "Update Count";
pub const LABEL_SET_STAR_INNER_SCALE: &str = "Update Star Inner Scale";
pub const LABEL_TOGGLE_VISIBLE: &str = "Toggle Visibility";
pub const LABEL_TOGGLE_LOCK: &str = "Toggle Lock";
pub const LABEL_SET_NAME: &str = "Rename";

/// Sets the canvas-space x position of every selected graphic.
pub fn set_x(editor: &mut Editor, ids: &[GraphicId], x: f64) {
    set_position_axis(editor, ids, AFFINE_TX, x, LABEL_SET_X);
}

/// Sets the canvas-space y position of every selected graphic.
pub fn set_y(editor: &mut Editor, ids: &[GraphicId], y: f64) {
    set_position_axis(editor, ids, AFFINE_TY, y, LABEL_SET_Y);
}

fn set_position_axis(editor: &mut Editor, ids: &[GraphicId], axis: usize, value: f64, label: &str) {
    with_transaction(editor, ids, label, |tx, scene, id| {
        tx.record_mutation(scene, id, &[AttrKey::Transform], |scene| {
            if let Some(mut tf) = scene.world_transform(id) {
                tf[axis] = value;
                scene.set_world_transform(id, tf);
            }
        });
    });
}

/// Sets the width of every selected graphic.
///
/// Children of the resized graphics keep their own size; only
/// resize-to-fit ancestors are refit.
pub fn set_width(editor: &mut Editor, ids: &[GraphicId], width: f64) {
    set_dimension(editor, ids, AttrKey::Width, width, LABEL_SET_WIDTH);
}

/// Sets the height of every selected graphic.
///
/// Children of the resized graphics keep their own size; only
/// resize-to-fit ancestors are refit.
pub fn set_height(editor: &mut Editor, ids: &[GraphicId], height: f64) {
    set_dimension(editor, ids, AttrKey::Height, height, LABEL_SET_HEIGHT);
}

fn set_dimension(editor: &mut Editor, ids: &[GraphicId], key: AttrKey, value: f64, label: &str) {
    let patch = Attrs::new().with(key, value);
    with_transaction(editor, ids, label, |tx, scene, id| {
        tx.record_mutation(scene, id, &[key], |scene| {
            if let Some(graphic) = scene.get_mut(id) {
                graphic.update_attrs(&patch);
            }
        });
    });
}

/// Sets the canvas-space rotation (radians) of every selected graphic,
/// each about its own centre.
pub fn set_rotation(editor: &mut Editor, ids: &[GraphicId], rotation: f64) {
    with_transaction(editor, ids, LABEL_SET_ROTATION, |tx, scene, id| {
        tx.record_mutation(scene, id, &[AttrKey::Transform], |scene| {
            scene.set_rotation(id, rotation);
        });
    });
}

/// Shows every selected graphic if at least one is hidden, otherwise hides
/// them all.
pub fn toggle_visible(editor: &mut Editor, ids: &[GraphicId]) {
    let visible = selected(&editor.scene, ids)
        .iter()
        .filter_map(|&id| editor.scene.get(id))
        .any(|g| !g.is_visible());
    let patch = Attrs::new().with(AttrKey::Visible, visible);
    with_transaction(editor, ids, LABEL_TOGGLE_VISIBLE, |tx, scene, id| {
        tx.record_mutation(scene, id, &[AttrKey::Visible], |scene| {
            if let Some(graphic) = scene.get_mut(id) {
                graphic.update_attrs(&patch);
            }
        });
    });
}

/// Sets the corner radius of every selected rectangle. Other kinds are
/// left out.
pub fn set_corner_radius(editor: &mut Editor, ids: &[GraphicId], radius: f64) {
    set_shared_attr(
        editor,
        ids,
        AttrKey::CornerRadius,
        radius.into(),
        LABEL_SET_CORNER_RADIUS,
    );
}

/// Sets the vertex count of every selected regular polygon and star.
///
/// Counts above [`MAX_OUTLINE_COUNT`](vellum_scene::MAX_OUTLINE_COUNT) are
/// kept but produce no outline.
pub fn set_count(editor: &mut Editor, ids: &[GraphicId], count: u32) {
    set_shared_attr(editor, ids, AttrKey::Count, count.into(), LABEL_SET_COUNT);
}

/// Sets the inner radius ratio of every selected star.
pub fn set_star_inner_scale(editor: &mut Editor, ids: &[GraphicId], scale: f64) {
    set_shared_attr(
        editor,
        ids,
        AttrKey::StarInnerScale,
        scale.into(),
        LABEL_SET_STAR_INNER_SCALE,
    );
}

/// Locks every selected graphic if at least one is unlocked, otherwise
/// unlocks them all.
pub fn toggle_lock(editor: &mut Editor, ids: &[GraphicId]) {
    let lock = selected(&editor.scene, ids)
        .iter()
        .filter_map(|&id| editor.scene.get(id))
        .any(|g| !g.is_locked());
    set_shared_attr(editor, ids, AttrKey::Lock, lock.into(), LABEL_TOGGLE_LOCK);
}

/// Renames one graphic.
pub fn set_name(editor: &mut Editor, id: GraphicId, name: &str) {
    set_shared_attr(editor, &[id], AttrKey::ObjectName, name.into(), LABEL_SET_NAME);
}

/// Selected ids still present in the scene, deduplicated, in selection order.
fn selected(scene: &Scene, ids: &[GraphicId]) -> Vec<GraphicId> {
    let mut present = Vec::with_capacity(ids.len());
    for &id in ids {
        if scene.contains(id) && !present.contains(&id) {
            present.push(id);
        }
    }
    present
}

/// Runs `edit` for every selected graphic inside one transaction, refits
/// their ancestors and commits under `label`.
fn with_transaction<F>(editor: &mut Editor, ids: &[GraphicId], label: &str, mut edit: F)
where
    F: FnMut(&mut Transaction, &mut Scene, GraphicId),
{
    let ids = selected(&editor.scene, ids);
    if ids.is_empty() {
        return;
    }

    let mut tx = Transaction::new();
    for &id in &ids {
        edit(&mut tx, &mut editor.scene, id);
    }
    tx.update_parent_size(&mut editor.scene, &ids);
    tx.commit(label, &mut editor.history);
}

/// Writes `value` under `key` to every selected graphic that supports it and
/// pushes one command holding each graphic's previous value.
fn set_shared_attr(
    editor: &mut Editor,
    ids: &[GraphicId],
    key: AttrKey,
    value: AttrValue,
    label: &str,
) {
    let targets: Vec<GraphicId> = selected(&editor.scene, ids)
        .into_iter()
        .filter(|&id| editor.scene.get(id).is_some_and(|g| g.supports(key)))
        .collect();
    if targets.is_empty() {
        log::debug!("{label}: no graphic in the selection supports {key}");
        return;
    }

    let before: Vec<Attrs> = targets
        .iter()
        .filter_map(|&id| editor.scene.get(id))
        .map(|g| Attrs::capture(g, &[key]))
        .collect();
    let after = Attrs::new().with(key, value);
    for &id in &targets {
        if let Some(graphic) = editor.scene.get_mut(id) {
            graphic.update_attrs(&after);
        }
    }
    editor.push_command(SetGraphicsAttrs::uniform(label, &targets, after, before));
}
