use crate::layout::OverlayLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDump {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDump {
    pub element: usize,
    pub text: String,
    pub anchor: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub displaced: bool,
    pub fallback: bool,
}

pub fn overlay_dump(layout: &OverlayLayout) -> OverlayDump {
    OverlayDump {
        viewport_width: layout.viewport.width,
        viewport_height: layout.viewport.height,
        scroll_x: layout.scroll.x,
        scroll_y: layout.scroll.y,
        labels: layout
            .labels
            .iter()
            .map(|label| LabelDump {
                element: label.element.index(),
                text: label.text.to_string(),
                anchor: label.anchor.as_str().to_string(),
                left: label.rect.left,
                top: label.rect.top,
                width: label.rect.width,
                height: label.rect.height,
                displaced: label.displaced,
                fallback: label.fallback,
            })
            .collect(),
    }
}

pub fn write_overlay_dump(path: &Path, layout: &OverlayLayout) -> anyhow::Result<()> {
    let dump = overlay_dump(layout);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
