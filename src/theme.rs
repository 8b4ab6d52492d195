use serde::{Deserialize, Serialize};

/// Visual constants for the injected overlay nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayTheme {
    pub background: String,
    pub text_color: String,
    pub border_color: String,
    pub border_width: f32,
    pub border_radius: f32,
    pub font_family: String,
    pub font_size: f32,
    pub line_height: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub max_label_width: f32,
    pub z_index: u32,
}

impl OverlayTheme {
    /// The red inspector look: translucent red chips with white monospace
    /// text.
    pub fn inspector() -> Self {
        Self {
            background: "rgba(255, 0, 0, 0.8)".to_string(),
            text_color: "#ffffff".to_string(),
            border_color: "#ff0000".to_string(),
            border_width: 1.0,
            border_radius: 3.0,
            font_family: "Monaco, Menlo, 'Ubuntu Mono', monospace".to_string(),
            font_size: 10.0,
            line_height: 1.2,
            padding_x: 6.0,
            padding_y: 2.0,
            max_label_width: 200.0,
            z_index: 999_999,
        }
    }

    /// A quieter dark variant for light pages.
    pub fn slate() -> Self {
        Self {
            background: "rgba(28, 36, 48, 0.85)".to_string(),
            text_color: "#f8faff".to_string(),
            border_color: "#1c2430".to_string(),
            border_width: 1.0,
            border_radius: 3.0,
            font_family: "ui-monospace, SFMono-Regular, Menlo, monospace".to_string(),
            font_size: 10.0,
            line_height: 1.2,
            padding_x: 6.0,
            padding_y: 2.0,
            max_label_width: 200.0,
            z_index: 999_999,
        }
    }

    /// Outer box size of a label chip given its measured text width.
    pub fn label_box(&self, text_width: f32) -> (f32, f32) {
        let width = text_width + 2.0 * self.padding_x + 2.0 * self.border_width;
        let height =
            self.font_size * self.line_height + 2.0 * self.padding_y + 2.0 * self.border_width;
        (width.min(self.max_label_width), height)
    }
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self::inspector()
    }
}
