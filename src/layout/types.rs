use crate::classify::LabelText;
use crate::dom::{ElementId, ScrollOffset, Viewport};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. Which space it lives in (page or viewport) is a
/// property of where it came from, not of the type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    /// Strict intersection test: rectangles that merely share an edge do not
    /// overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// The five fixed candidate positions for a label relative to its element's
/// rectangle, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl AnchorKind {
    pub const ORDER: [AnchorKind; 5] = [
        AnchorKind::TopLeft,
        AnchorKind::TopRight,
        AnchorKind::BottomLeft,
        AnchorKind::BottomRight,
        AnchorKind::Center,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorKind::TopLeft => "topLeft",
            AnchorKind::TopRight => "topRight",
            AnchorKind::BottomLeft => "bottomLeft",
            AnchorKind::BottomRight => "bottomRight",
            AnchorKind::Center => "center",
        }
    }
}

/// One placed label: the pass-scoped descriptor emitted per qualifying
/// element. `rect` is in page coordinates and reflects any upward
/// displacement applied while later labels were placed.
#[derive(Debug, Clone)]
pub struct PlacedLabel {
    pub element: ElementId,
    pub text: LabelText,
    pub anchor: AnchorKind,
    pub rect: Rect,
    /// Set when a later placement nudged this label upward.
    pub displaced: bool,
    /// Set when every anchor fell outside the viewport and the top-left
    /// fallback was used regardless.
    pub fallback: bool,
}

/// Result of one full layout pass: clear all, then re-place all.
#[derive(Debug, Clone)]
pub struct OverlayLayout {
    pub labels: Vec<PlacedLabel>,
    pub viewport: Viewport,
    pub scroll: ScrollOffset,
}

impl OverlayLayout {
    pub fn label_for(&self, element: ElementId) -> Option<&PlacedLabel> {
        self.labels.iter().find(|label| label.element == element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.9, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn vertically_separated_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }
}
