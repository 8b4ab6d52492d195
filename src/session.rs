use crate::config::Config;
use crate::dom::{DocumentSnapshot, ElementId};
use crate::hover::{HoverController, HoverLabel};
use crate::layout::{OverlayLayout, compute_overlay_layout};
use crate::scheduler::RecomputeScheduler;
use crate::text_metrics::LabelMeasurer;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// What the overlay shows while enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// Label every qualifying element, plus the pointer-following label.
    ShowAllAndHover,
    /// Only the pointer-following label.
    HoverOnly,
}

/// Per-page overlay state: the enabled flag and display mode the host
/// persists elsewhere, the mutation debouncer, and the hover controller.
/// Layout passes stay synchronous; the host calls [`recompute`] with a
/// fresh snapshot whenever this session asks for one, clears its injected
/// nodes, and re-renders from the returned frame.
///
/// [`recompute`]: OverlaySession::recompute
#[derive(Debug)]
pub struct OverlaySession {
    config: Config,
    enabled: bool,
    mode: DisplayMode,
    scheduler: RecomputeScheduler,
    hover: HoverController,
}

impl OverlaySession {
    pub fn new(config: Config) -> Self {
        let enabled = config.session.start_enabled;
        let scheduler = RecomputeScheduler::from_millis(config.session.debounce_ms);
        let hover = HoverController::new(config.hover.clone());
        Self {
            config,
            enabled,
            mode: DisplayMode::ShowAllAndHover,
            scheduler,
            hover,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Flip the overlay on or off. Returns true when the host should act:
    /// recompute and render on enable, remove every overlay node on
    /// disable.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        if !enabled {
            self.scheduler.cancel();
            self.hover.on_leave();
        }
        true
    }

    /// Change display mode. Returns true when the placed labels need a
    /// refresh (the host should recompute or clear).
    pub fn set_mode(&mut self, mode: DisplayMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.enabled
    }

    fn layout_active(&self) -> bool {
        self.enabled && self.mode == DisplayMode::ShowAllAndHover
    }

    /// A DOM mutation batch arrived. Debounced: rapid bursts coalesce into
    /// one recomputation.
    pub fn on_mutation(&mut self, now: Instant) {
        if self.layout_active() {
            self.scheduler.trigger(now);
        }
    }

    /// True when a debounced recompute has come due.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.scheduler.poll(now)
    }

    /// Scroll and resize invalidate every placement immediately. Returns
    /// true when the host should recompute now.
    pub fn on_scroll(&self) -> bool {
        self.layout_active()
    }

    pub fn on_resize(&self) -> bool {
        self.layout_active()
    }

    /// Run a full layout pass over the given snapshot. `None` when the
    /// overlay is disabled or the mode shows hover labels only; the host
    /// clears its nodes in that case.
    pub fn recompute(
        &self,
        doc: &DocumentSnapshot,
        measurer: &dyn LabelMeasurer,
    ) -> Option<OverlayLayout> {
        if !self.layout_active() {
            return None;
        }
        Some(compute_overlay_layout(
            doc,
            measurer,
            &self.config.theme,
            &self.config.layout,
        ))
    }

    pub fn on_pointer_enter(
        &mut self,
        doc: &DocumentSnapshot,
        element: ElementId,
        pointer_x: f32,
        pointer_y: f32,
    ) {
        if !self.enabled {
            return;
        }
        self.hover.on_enter(
            doc,
            element,
            pointer_x,
            pointer_y,
            &self.config.layout.classifier,
        );
    }

    pub fn on_pointer_move(&mut self, pointer_x: f32, pointer_y: f32) {
        if !self.enabled {
            return;
        }
        self.hover.on_move(pointer_x, pointer_y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover.on_leave();
    }

    pub fn hover_label(&self) -> Option<&HoverLabel> {
        self.hover.label()
    }
}
