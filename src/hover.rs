use crate::classify::{LabelText, classify};
use crate::config::{ClassifierConfig, HoverConfig};
use crate::dom::{DocumentSnapshot, ElementId};

/// The single pointer-following label. Coordinates are viewport-relative
/// (the label is a fixed-position overlay), so it tracks the pointer even
/// while the page scrolls.
#[derive(Debug, Clone)]
pub struct HoverLabel {
    pub element: ElementId,
    pub text: LabelText,
    pub x: f32,
    pub y: f32,
}

/// Tracks at most one hover label system-wide. Completely independent of
/// the layout engine's occupancy registry: pointer events and layout passes
/// share no mutable state.
#[derive(Debug)]
pub struct HoverController {
    config: HoverConfig,
    label: Option<HoverLabel>,
}

impl HoverController {
    pub fn new(config: HoverConfig) -> Self {
        Self {
            config,
            label: None,
        }
    }

    /// Pointer entered an element. A non-qualifying element is a complete
    /// no-op: no label shown, no state change. A qualifying enter while a
    /// label is already visible re-targets it, discarding prior content.
    pub fn on_enter(
        &mut self,
        doc: &DocumentSnapshot,
        element: ElementId,
        pointer_x: f32,
        pointer_y: f32,
        classifier: &ClassifierConfig,
    ) {
        let Some(text) = classify(doc, element, classifier) else {
            return;
        };
        self.label = Some(HoverLabel {
            element,
            text,
            x: pointer_x + self.config.offset_x,
            y: pointer_y + self.config.offset_y,
        });
    }

    /// Pointer moved. No-op unless a label is visible.
    pub fn on_move(&mut self, pointer_x: f32, pointer_y: f32) {
        if let Some(label) = &mut self.label {
            label.x = pointer_x + self.config.offset_x;
            label.y = pointer_y + self.config.offset_y;
        }
    }

    /// Pointer left. Hides unconditionally; no-op when already hidden.
    pub fn on_leave(&mut self) {
        self.label = None;
    }

    pub fn label(&self) -> Option<&HoverLabel> {
        self.label.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.label.is_some()
    }
}

impl Default for HoverController {
    fn default() -> Self {
        Self::new(HoverConfig::default())
    }
}
