pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dom;
pub mod dump;
pub mod hover;
pub mod layout;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod text_metrics;
pub mod theme;

pub use classify::{LabelText, classify};
pub use config::{Config, LayoutConfig, load_config};
pub use dom::{DocumentSnapshot, ElementId, SnapshotBuilder, SnapshotError};
pub use hover::{HoverController, HoverLabel};
pub use layout::{AnchorKind, OverlayLayout, PlacedLabel, Rect, compute_overlay_layout};
pub use scheduler::RecomputeScheduler;
pub use session::{DisplayMode, OverlaySession};
pub use text_metrics::{CharCellMeasurer, FontMeasurer, LabelMeasurer};
pub use theme::OverlayTheme;

#[cfg(feature = "cli")]
pub use cli::run;
