use crate::config::ClassifierConfig;
use crate::hover::HoverLabel;
use crate::layout::{OverlayLayout, PlacedLabel};
use crate::theme::OverlayTheme;

/// One overlay node for the host to inject: the label text, the class that
/// marks it as overlay machinery, and the full inline style block.
#[derive(Debug, Clone)]
pub struct OverlayNode {
    pub text: String,
    pub class_name: String,
    pub css_text: String,
}

/// Style rules shared by every label chip.
fn base_css(theme: &OverlayTheme) -> String {
    format!(
        "background: {}; color: {}; padding: {}px {}px; border-radius: {}px; \
         font-family: {}; font-size: {}px; font-weight: bold; line-height: {}; \
         pointer-events: none; z-index: {}; white-space: nowrap; \
         max-width: {}px; overflow: hidden; text-overflow: ellipsis; \
         border: {}px solid {};",
        theme.background,
        theme.text_color,
        theme.padding_y,
        theme.padding_x,
        theme.border_radius,
        theme.font_family,
        theme.font_size,
        theme.line_height,
        theme.z_index,
        theme.max_label_width,
        theme.border_width,
        theme.border_color,
    )
}

fn placed_node(label: &PlacedLabel, theme: &OverlayTheme, classifier: &ClassifierConfig) -> OverlayNode {
    let css_text = format!(
        "position: absolute; left: {:.2}px; top: {:.2}px; {}",
        label.rect.left,
        label.rect.top,
        base_css(theme)
    );
    OverlayNode {
        text: label.text.to_string(),
        class_name: classifier.overlay_marker_class.clone(),
        css_text,
    }
}

/// Build the injectable node list for one layout frame. The host removes
/// every previous overlay node first: each frame fully replaces the last.
pub fn overlay_nodes(
    layout: &OverlayLayout,
    theme: &OverlayTheme,
    classifier: &ClassifierConfig,
) -> Vec<OverlayNode> {
    layout
        .labels
        .iter()
        .map(|label| placed_node(label, theme, classifier))
        .collect()
}

/// The hover label is fixed-position so it stays glued to the pointer
/// while the page scrolls underneath.
pub fn hover_node(
    label: &HoverLabel,
    theme: &OverlayTheme,
    classifier: &ClassifierConfig,
) -> OverlayNode {
    let css_text = format!(
        "position: fixed; left: {:.2}px; top: {:.2}px; {}",
        label.x,
        label.y,
        base_css(theme)
    );
    OverlayNode {
        text: label.text.to_string(),
        class_name: classifier.overlay_marker_class.clone(),
        css_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::dom::SnapshotBuilder;
    use crate::layout::{Rect, compute_overlay_layout};
    use crate::text_metrics::CharCellMeasurer;

    #[test]
    fn placed_nodes_are_absolute_and_marked() {
        let mut builder = SnapshotBuilder::new(1280.0, 800.0);
        let element = builder.element("div", None, Rect::new(10.0, 20.0, 300.0, 120.0));
        builder.classes(element, &["card"]);
        let doc = builder.build();

        let config = LayoutConfig::default();
        let theme = OverlayTheme::inspector();
        let layout =
            compute_overlay_layout(&doc, &CharCellMeasurer::default(), &theme, &config);
        let nodes = overlay_nodes(&layout, &theme, &config.classifier);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text, "div.card");
        assert_eq!(nodes[0].class_name, "domlens-overlay");
        assert!(nodes[0].css_text.starts_with("position: absolute; left: 12.00px; top: 22.00px;"));
        assert!(nodes[0].css_text.contains("z-index: 999999"));
    }

    #[test]
    fn hover_node_is_fixed_position() {
        use crate::classify::LabelText;

        let mut builder = SnapshotBuilder::new(100.0, 100.0);
        let element = builder.element("div", None, Rect::new(0.0, 0.0, 50.0, 50.0));

        let label = HoverLabel {
            element,
            text: LabelText {
                tag: "div".to_string(),
                classes: vec![],
                id: None,
            },
            x: 110.0,
            y: 70.0,
        };
        let node = hover_node(
            &label,
            &OverlayTheme::inspector(),
            &ClassifierConfig::default(),
        );
        assert!(node.css_text.starts_with("position: fixed; left: 110.00px; top: 70.00px;"));
    }
}
