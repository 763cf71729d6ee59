use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use vellum_editor::{Editor, mutate};
use vellum_scene::{GraphicBuilder, GraphicId, GraphicKind};

/// `frames` frames, each holding `per_frame` rectangles.
fn populated_editor(frames: usize, per_frame: usize) -> (Editor, Vec<GraphicId>) {
    let mut editor = Editor::default();
    let mut leaves = Vec::with_capacity(frames * per_frame);
    for f in 0..frames {
        let frame = editor.scene.add(
            GraphicBuilder::new(GraphicKind::Frame).position(f as f64 * 500.0, 0.0),
            None,
        );
        for i in 0..per_frame {
            leaves.push(editor.scene.add(
                GraphicBuilder::new(GraphicKind::Rect).position(i as f64 * 10.0, 0.0),
                Some(frame),
            ));
        }
        editor.scene.resize_to_fit(frame);
    }
    (editor, leaves)
}

// ---------------------------------------------------------------------------
// Transaction-backed edits
// ---------------------------------------------------------------------------

fn bench_set_x_with_refit(c: &mut Criterion) {
    c.bench_function("set_x_100_children_in_10_frames", |b| {
        b.iter_batched(
            || populated_editor(10, 10),
            |(mut editor, ids)| {
                mutate::set_x(&mut editor, black_box(&ids), black_box(42.0));
                editor
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_set_width_with_refit(c: &mut Criterion) {
    c.bench_function("set_width_100_children_in_10_frames", |b| {
        b.iter_batched(
            || populated_editor(10, 10),
            |(mut editor, ids)| {
                mutate::set_width(&mut editor, black_box(&ids), black_box(250.0));
                editor
            },
            BatchSize::SmallInput,
        );
    });
}

// ---------------------------------------------------------------------------
// Attribute edits
// ---------------------------------------------------------------------------

fn bench_set_corner_radius(c: &mut Criterion) {
    c.bench_function("set_corner_radius_1000", |b| {
        b.iter_batched(
            || populated_editor(10, 100),
            |(mut editor, ids)| {
                mutate::set_corner_radius(&mut editor, black_box(&ids), black_box(8.0));
                editor
            },
            BatchSize::SmallInput,
        );
    });
}

// ---------------------------------------------------------------------------
// Undo / redo
// ---------------------------------------------------------------------------

fn bench_undo_redo(c: &mut Criterion) {
    let (mut editor, ids) = populated_editor(10, 10);
    mutate::set_y(&mut editor, &ids, 300.0);
    c.bench_function("undo_redo_set_y_100", |b| {
        b.iter(|| {
            black_box(editor.undo());
            black_box(editor.redo());
        });
    });
}

criterion_group!(
    benches,
    bench_set_x_with_refit,
    bench_set_width_with_refit,
    bench_set_corner_radius,
    bench_undo_redo,
);
criterion_main!(benches);
