use crate::config::ClassifierConfig;
use crate::dom::{DocumentSnapshot, ElementId};
use std::fmt;

/// Structured label content for one element. Rendering joins the segments
/// with their prefixes only: tag, then `.class` tokens space-joined, then
/// `#id` — e.g. `div.card .active#main`. Hosts that style segments
/// individually consume the fields instead of the `Display` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelText {
    pub tag: String,
    pub classes: Vec<String>,
    pub id: Option<String>,
}

impl fmt::Display for LabelText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        for (index, class) in self.classes.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, ".{class}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}

/// Decide whether an element qualifies for a label, and what it says.
///
/// Fails closed (`None`) for: the overlay's own injected nodes (recognized
/// by the marker class), elements that are not rendered, elements smaller
/// than the minimum size in either dimension, and elements with nothing
/// informative to show (no tag, no class, no id). Pure: reads the snapshot,
/// mutates nothing.
pub fn classify(
    doc: &DocumentSnapshot,
    element: ElementId,
    config: &ClassifierConfig,
) -> Option<LabelText> {
    let classes = doc.classes(element);
    if classes.iter().any(|c| c == &config.overlay_marker_class) {
        return None;
    }
    if !doc.style(element).is_rendered() {
        return None;
    }
    let rect = doc.viewport_rect(element);
    if rect.width < config.min_width || rect.height < config.min_height {
        return None;
    }
    let tag = doc.tag(element).to_ascii_lowercase();
    let id = doc.dom_id(element).map(|id| id.to_string());
    if tag.is_empty() && classes.is_empty() && id.is_none() {
        return None;
    }
    Some(LabelText {
        tag,
        classes: classes.to_vec(),
        id,
    })
}
