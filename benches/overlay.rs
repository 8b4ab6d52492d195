use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domlens::config::LayoutConfig;
use domlens::dom::{DocumentSnapshot, SnapshotBuilder};
use domlens::layout::{Rect, compute_overlay_layout};
use domlens::text_metrics::CharCellMeasurer;
use domlens::theme::OverlayTheme;
use std::hint::black_box;

/// Synthetic page: a grid of cards under one container, with a nested
/// span inside each card so the displacement path gets exercised.
fn grid_document(rows: usize, cols: usize) -> DocumentSnapshot {
    let width = cols as f32 * 120.0;
    let height = rows as f32 * 90.0;
    let mut builder = SnapshotBuilder::new(width, height);
    let root = builder.element("main", None, Rect::new(0.0, 0.0, width, height));
    builder.classes(root, &["grid"]);
    for row in 0..rows {
        for col in 0..cols {
            let x = col as f32 * 120.0;
            let y = row as f32 * 90.0;
            let card = builder.element("div", Some(root), Rect::new(x, y, 112.0, 82.0));
            builder.classes(card, &["card"]);
            let inner = builder.element("span", Some(card), Rect::new(x + 4.0, y + 4.0, 100.0, 30.0));
            builder.classes(inner, &["title"]);
        }
    }
    builder.build()
}

fn bench_layout(c: &mut Criterion) {
    let theme = OverlayTheme::inspector();
    let config = LayoutConfig::default();
    let measurer = CharCellMeasurer::default();

    let mut group = c.benchmark_group("overlay_layout");
    for (rows, cols) in [(4usize, 6usize), (10, 12), (25, 24)] {
        let doc = grid_document(rows, cols);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", rows, cols)),
            &doc,
            |b, doc| {
                b.iter(|| {
                    let layout = compute_overlay_layout(
                        black_box(doc),
                        &measurer,
                        &theme,
                        &config,
                    );
                    black_box(layout.labels.len())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
