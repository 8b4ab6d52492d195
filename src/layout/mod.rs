mod placement;
pub(crate) mod types;
pub use types::*;

use crate::classify::{LabelText, classify};
use crate::config::LayoutConfig;
use crate::dom::{DocumentSnapshot, ElementId};
use crate::text_metrics::LabelMeasurer;
use crate::theme::OverlayTheme;
use std::cmp::Ordering;

/// Compute one full set of label placements for the current document
/// snapshot.
///
/// Qualifying elements are laid out largest-first so container labels land
/// before the smaller, more specific elements claim close-fitting spots.
/// The pass is deterministic for a given snapshot and never fails: a label
/// that cannot be placed cleanly overlaps or falls back to its element's
/// top-left corner.
pub fn compute_overlay_layout(
    doc: &DocumentSnapshot,
    measurer: &dyn LabelMeasurer,
    theme: &OverlayTheme,
    config: &LayoutConfig,
) -> OverlayLayout {
    let mut entries: Vec<(ElementId, LabelText, Rect, (f32, f32))> = Vec::new();
    for element in doc.ids() {
        let Some(text) = classify(doc, element, &config.classifier) else {
            continue;
        };
        let rect = doc.page_rect(element);
        if rect.width <= 0.0 || rect.height <= 0.0 {
            continue;
        }
        let text_width = measurer.text_width(&text.to_string(), theme.font_size, &theme.font_family);
        let size = theme.label_box(text_width);
        entries.push((element, text, rect, size));
    }

    // Stable sort: area descending, encounter order on ties.
    entries.sort_by(|a, b| b.2.area().partial_cmp(&a.2.area()).unwrap_or(Ordering::Equal));

    let labels = placement::place_labels(doc, entries, &config.placement);
    OverlayLayout {
        labels,
        viewport: doc.viewport(),
        scroll: doc.scroll(),
    }
}
