// Anchor selection, occupancy tracking, and the upward-displacement rule.
// Everything here is pure geometry over one document snapshot; rendering is
// the host's problem.

use super::types::{AnchorKind, PlacedLabel, Rect};
use crate::classify::LabelText;
use crate::config::PlacementConfig;
use crate::dom::{DocumentSnapshot, ElementId};
use std::collections::HashMap;

/// Already-placed label rectangles for the current pass. Placement order is
/// preserved because conflict resolution always acts on the first occupant
/// found, and "first" means earliest placed. At most one entry per element.
#[derive(Debug, Default)]
pub(crate) struct OccupancyRegistry {
    placed: Vec<PlacedLabel>,
    by_element: HashMap<ElementId, usize>,
}

impl OccupancyRegistry {
    fn insert(&mut self, label: PlacedLabel) {
        debug_assert!(!self.by_element.contains_key(&label.element));
        self.by_element.insert(label.element, self.placed.len());
        self.placed.push(label);
    }

    /// Index of the earliest-placed label whose rectangle strictly overlaps
    /// `candidate`.
    fn first_conflict(&self, candidate: &Rect) -> Option<usize> {
        self.placed
            .iter()
            .position(|occupant| occupant.rect.intersects(candidate))
    }

    fn occupant(&self, index: usize) -> &PlacedLabel {
        &self.placed[index]
    }

    /// Nudge an existing occupant upward in place. The occupant is not
    /// re-checked against the rest of the registry; residual overlap is an
    /// accepted outcome of the heuristic.
    fn displace_up(&mut self, index: usize, offset: f32) {
        let occupant = &mut self.placed[index];
        occupant.rect.top -= offset;
        occupant.displaced = true;
    }

    fn into_labels(self) -> Vec<PlacedLabel> {
        self.placed
    }
}

/// Whether the existing occupant `occupant` yields (moves up) to the
/// element currently being placed.
///
/// An ancestor's label always yields to a descendant's. A label on an
/// element sharing the same immediate parent yields when it sits no deeper
/// than the current element. Otherwise only strictly shallower occupants
/// yield: more specific (deeper) elements win the contested spot.
fn occupant_yields(doc: &DocumentSnapshot, occupant: ElementId, current: ElementId) -> bool {
    if doc.is_ancestor(occupant, current) {
        return true;
    }
    if doc.same_parent(occupant, current) {
        return doc.depth(occupant) <= doc.depth(current);
    }
    doc.depth(occupant) < doc.depth(current)
}

/// The five candidate label rectangles for an element, in trial order.
/// `element_rect` and the results are in page coordinates.
fn anchor_candidates(
    element_rect: &Rect,
    label_width: f32,
    label_height: f32,
    margin: f32,
) -> [(AnchorKind, Rect); 5] {
    let top_left = (element_rect.left + margin, element_rect.top + margin);
    let top_right = (
        element_rect.right() - margin - label_width,
        element_rect.top + margin,
    );
    let bottom_left = (
        element_rect.left + margin,
        element_rect.bottom() - margin - label_height,
    );
    let bottom_right = (
        element_rect.right() - margin - label_width,
        element_rect.bottom() - margin - label_height,
    );
    let center = (
        element_rect.center_x() - label_width / 2.0,
        element_rect.center_y() - label_height / 2.0,
    );
    let rect = |pos: (f32, f32)| Rect::new(pos.0, pos.1, label_width, label_height);
    [
        (AnchorKind::TopLeft, rect(top_left)),
        (AnchorKind::TopRight, rect(top_right)),
        (AnchorKind::BottomLeft, rect(bottom_left)),
        (AnchorKind::BottomRight, rect(bottom_right)),
        (AnchorKind::Center, rect(center)),
    ]
}

/// A label may only be anchored fully inside the current viewport. `rect`
/// is in page coordinates; the viewport window is the scroll offset plus
/// the viewport size.
fn fits_viewport(doc: &DocumentSnapshot, rect: &Rect) -> bool {
    let scroll = doc.scroll();
    let viewport = doc.viewport();
    let left = rect.left - scroll.x;
    let top = rect.top - scroll.y;
    left >= 0.0
        && top >= 0.0
        && left + rect.width <= viewport.width
        && top + rect.height <= viewport.height
}

/// Place labels for the given (element, text, page rect, label size)
/// entries, already sorted largest-element-first. Every entry produces a
/// placement; conflicts degrade to displacement, accepted overlap, or the
/// top-left fallback, never to an error.
pub(crate) fn place_labels(
    doc: &DocumentSnapshot,
    entries: Vec<(ElementId, LabelText, Rect, (f32, f32))>,
    config: &PlacementConfig,
) -> Vec<PlacedLabel> {
    let mut registry = OccupancyRegistry::default();

    for (element, text, element_rect, (label_width, label_height)) in entries {
        let candidates =
            anchor_candidates(&element_rect, label_width, label_height, config.anchor_margin);

        let mut accepted: Option<(AnchorKind, Rect)> = None;
        for (kind, candidate) in candidates {
            if !fits_viewport(doc, &candidate) {
                continue;
            }
            if let Some(conflict) = registry.first_conflict(&candidate) {
                let occupant = registry.occupant(conflict).element;
                if occupant_yields(doc, occupant, element) {
                    registry.displace_up(conflict, config.displacement_offset);
                }
                // Whether or not the occupant moved, the candidate stands at
                // its originally computed position.
            }
            accepted = Some((kind, candidate));
            break;
        }

        let (anchor, rect, fallback) = match accepted {
            Some((kind, rect)) => (kind, rect, false),
            // All five anchors were off-viewport: take top-left regardless,
            // so every qualifying element ends up with a placement.
            None => (AnchorKind::TopLeft, candidates[0].1, true),
        };

        registry.insert(PlacedLabel {
            element,
            text,
            anchor,
            rect,
            displaced: false,
            fallback,
        });
    }

    registry.into_labels()
}
