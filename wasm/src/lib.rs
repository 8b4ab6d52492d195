use domlens::config::{Config, LayoutConfig};
use domlens::dom::DocumentSnapshot;
use domlens::dump::overlay_dump;
use domlens::layout::compute_overlay_layout;
use domlens::text_metrics::CharCellMeasurer;
use domlens::theme::OverlayTheme;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverlayOptions {
    theme: Option<String>,
    font_size: Option<f32>,
    char_advance: Option<f32>,
}

fn build_config(options: &OverlayOptions) -> Config {
    let mut config = Config::default();
    config.theme = if options.theme.as_deref() == Some("slate") {
        OverlayTheme::slate()
    } else {
        OverlayTheme::inspector()
    };
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    config
}

/// Compute label placements for a serialized DOM snapshot. Returns the
/// placement frame as JSON; the content script renders it.
///
/// Text widths are estimated per character: system font metrics are not
/// available inside the extension sandbox.
#[wasm_bindgen]
pub fn layout_overlay(snapshot_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<OverlayOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string()))?,
        None => OverlayOptions::default(),
    };
    let config = build_config(&options);
    let measurer = CharCellMeasurer {
        advance: options.char_advance.unwrap_or(CharCellMeasurer::default().advance),
    };

    let doc = DocumentSnapshot::from_json(snapshot_json)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let layout = compute_overlay_layout(&doc, &measurer, &config.theme, &config.layout);
    serde_json::to_string(&overlay_dump(&layout)).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Classify one element of a serialized snapshot: its label text, or null
/// when the element does not qualify.
#[wasm_bindgen]
pub fn classify_element(snapshot_json: &str, index: usize) -> Result<Option<String>, JsValue> {
    let doc = DocumentSnapshot::from_json(snapshot_json)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let Some(element) = doc.get(index) else {
        return Err(JsValue::from_str(&format!("no element at index {index}")));
    };
    let config = LayoutConfig::default();
    Ok(domlens::classify(&doc, element, &config.classifier).map(|text| text.to_string()))
}
