use crate::theme::OverlayTheme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Qualification thresholds for the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Elements narrower than this are treated as decorative noise.
    pub min_width: f32,
    /// Elements shorter than this are treated as decorative noise.
    pub min_height: f32,
    /// Class the host puts on injected overlay nodes; anything carrying it
    /// is never labeled, which keeps the overlay from labeling itself.
    pub overlay_marker_class: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_width: 10.0,
            min_height: 10.0,
            overlay_marker_class: "domlens-overlay".to_string(),
        }
    }
}

/// Knobs for the placement pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementConfig {
    /// Inward inset from the element corner for each anchor candidate.
    pub anchor_margin: f32,
    /// How far an existing label is nudged upward to make room.
    pub displacement_offset: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            anchor_margin: 2.0,
            displacement_offset: 24.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Offsets from the pointer to the hover label, in viewport coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverConfig {
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            offset_x: 10.0,
            offset_y: -30.0,
        }
    }
}

/// Session-level behavior: start state and mutation debounce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Whether the overlay starts enabled before the host flips it.
    pub start_enabled: bool,
    /// Window within which DOM mutation bursts coalesce into one recompute.
    pub debounce_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_enabled: false,
            debounce_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub theme: OverlayTheme,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub hover: HoverConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Load a config file, or the defaults when no path is given. Accepts strict
/// JSON first and falls back to JSON5 for hand-written files with comments
/// or trailing commas.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Config>(&contents) {
        Ok(config) => Ok(config),
        Err(json_err) => match json5::from_str::<Config>(&contents) {
            Ok(config) => Ok(config),
            Err(_) => Err(json_err.into()),
        },
    }
}
