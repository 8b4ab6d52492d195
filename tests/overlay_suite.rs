use std::path::Path;

use domlens::{
    CharCellMeasurer, DocumentSnapshot, LayoutConfig, OverlayLayout, OverlayTheme,
    compute_overlay_layout,
};

fn layout_fixture(path: &Path) -> (DocumentSnapshot, OverlayLayout) {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let doc = DocumentSnapshot::from_json(&input).expect("fixture parse failed");
    let layout = compute_overlay_layout(
        &doc,
        &CharCellMeasurer::default(),
        &OverlayTheme::inspector(),
        &LayoutConfig::default(),
    );
    (doc, layout)
}

fn assert_frame_invariants(doc: &DocumentSnapshot, layout: &OverlayLayout, fixture: &str) {
    // At most one label per element.
    let mut seen = std::collections::HashSet::new();
    for label in &layout.labels {
        assert!(
            seen.insert(label.element),
            "{fixture}: element labeled twice"
        );
        assert!(
            !label.text.to_string().is_empty(),
            "{fixture}: empty label text"
        );
    }
    // Labels that were anchored (not fallback, not displaced) sit inside
    // the viewport window.
    let scroll = doc.scroll();
    for label in layout.labels.iter().filter(|l| !l.fallback && !l.displaced) {
        let left = label.rect.left - scroll.x;
        let top = label.rect.top - scroll.y;
        assert!(left >= 0.0, "{fixture}: label left {left} out of viewport");
        assert!(top >= 0.0, "{fixture}: label top {top} out of viewport");
        assert!(
            left + label.rect.width <= layout.viewport.width,
            "{fixture}: label exceeds viewport width"
        );
        assert!(
            top + label.rect.height <= layout.viewport.height,
            "{fixture}: label exceeds viewport height"
        );
    }
}

#[test]
fn layout_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "simple.json",
        "nested.json",
        "siblings.json",
        "hidden.json",
        "scrolled.json",
        "dense.json",
    ];

    for rel in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {rel}");
        let (doc, layout) = layout_fixture(&path);
        assert_frame_invariants(&doc, &layout, rel);

        // Determinism across repeated passes over the same snapshot.
        let again = compute_overlay_layout(
            &doc,
            &CharCellMeasurer::default(),
            &OverlayTheme::inspector(),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.labels.len(), again.labels.len(), "{rel}");
        for (a, b) in layout.labels.iter().zip(again.labels.iter()) {
            assert_eq!(a.element, b.element, "{rel}");
            assert_eq!(a.rect, b.rect, "{rel}: placement not idempotent");
        }
    }
}

#[test]
fn hidden_fixture_labels_only_rendered_elements() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let (_, layout) = layout_fixture(&root.join("hidden.json"));

    let texts: Vec<String> = layout.labels.iter().map(|l| l.text.to_string()).collect();
    assert!(texts.contains(&"div.visible".to_string()));
    assert!(!texts.iter().any(|t| t.contains("concealed")));
    assert!(!texts.iter().any(|t| t.contains("tiny")));
}

#[test]
fn sibling_fixture_resolves_contested_corner() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let (_, layout) = layout_fixture(&root.join("siblings.json"));

    assert_eq!(layout.labels.len(), 3);
    for (i, a) in layout.labels.iter().enumerate() {
        for b in layout.labels.iter().skip(i + 1) {
            assert!(
                !a.rect.intersects(&b.rect),
                "labels {} and {} overlap",
                a.text,
                b.text
            );
        }
    }
}

#[test]
fn dense_fixture_places_every_qualifying_element() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let (doc, layout) = layout_fixture(&root.join("dense.json"));

    // Every element in the dense grid qualifies; every one gets exactly
    // one placement even where conflicts force overlap.
    assert_eq!(layout.labels.len(), doc.len());
}
