use crate::layout::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle into a [`DocumentSnapshot`]. Stable for the lifetime of the
/// snapshot it was issued by; meaningless across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

/// The subset of computed style the classifier consults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_display() -> String {
    "block".to_string()
}

fn default_visibility() -> String {
    "visible".to_string()
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: default_display(),
            visibility: default_visibility(),
            opacity: default_opacity(),
        }
    }
}

impl ComputedStyle {
    /// Matches the host-side notion of a rendered element: anything with
    /// `display: none`, `visibility: hidden`, or opacity exactly zero is
    /// treated as not rendered.
    pub fn is_rendered(&self) -> bool {
        self.display != "none" && self.visibility != "hidden" && self.opacity != 0.0
    }
}

/// One element as marshalled by the host. `rect` is viewport-relative
/// (`getBoundingClientRect` semantics); page coordinates are derived with the
/// snapshot scroll offset. `parent` refers to an element declared earlier in
/// the list, so the tree arrives in topological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub parent: Option<usize>,
    pub rect: Rect,
    #[serde(default)]
    pub style: ComputedStyle,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("element {element} names itself as its parent")]
    SelfParent { element: usize },
    #[error("element {element} references parent {parent}, which is not declared before it")]
    ForwardParent { element: usize, parent: usize },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    viewport: Viewport,
    #[serde(default)]
    scroll: ScrollOffset,
    #[serde(default)]
    elements: Vec<ElementRecord>,
}

/// A read-only view of the rendered document, captured once per
/// recomputation pass. The engine never caches geometry across snapshots.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    viewport: Viewport,
    scroll: ScrollOffset,
    elements: Vec<ElementRecord>,
    depths: Vec<u32>,
}

impl DocumentSnapshot {
    pub fn from_records(
        viewport: Viewport,
        scroll: ScrollOffset,
        elements: Vec<ElementRecord>,
    ) -> Result<Self, SnapshotError> {
        let mut depths = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            match element.parent {
                None => depths.push(0),
                Some(parent) if parent == index => {
                    return Err(SnapshotError::SelfParent { element: index });
                }
                Some(parent) if parent > index => {
                    return Err(SnapshotError::ForwardParent {
                        element: index,
                        parent,
                    });
                }
                Some(parent) => depths.push(depths[parent] + 1),
            }
        }
        Ok(Self {
            viewport,
            scroll,
            elements,
            depths,
        })
    }

    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(input)?;
        Self::from_records(raw.viewport, raw.scroll, raw.elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    pub fn get(&self, index: usize) -> Option<ElementId> {
        (index < self.elements.len()).then_some(ElementId(index))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn tag(&self, element: ElementId) -> &str {
        &self.elements[element.0].tag
    }

    pub fn classes(&self, element: ElementId) -> &[String] {
        &self.elements[element.0].classes
    }

    pub fn dom_id(&self, element: ElementId) -> Option<&str> {
        self.elements[element.0].id.as_deref()
    }

    pub fn style(&self, element: ElementId) -> &ComputedStyle {
        &self.elements[element.0].style
    }

    /// Viewport-relative bounding rect, as captured by the host.
    pub fn viewport_rect(&self, element: ElementId) -> Rect {
        self.elements[element.0].rect
    }

    /// Page-space bounding rect: the viewport rect shifted by the document
    /// scroll offset at capture time.
    pub fn page_rect(&self, element: ElementId) -> Rect {
        self.elements[element.0]
            .rect
            .translated(self.scroll.x, self.scroll.y)
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements[element.0].parent.map(ElementId)
    }

    /// Ancestor steps from the element up to (excluding) the root container.
    /// Elements without a parent in the snapshot sit at depth zero.
    pub fn depth(&self, element: ElementId) -> u32 {
        self.depths[element.0]
    }

    /// True when `ancestor` lies strictly above `element` in the tree.
    pub fn is_ancestor(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut cursor = self.parent(element);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// True when both elements share the same immediate parent.
    pub fn same_parent(&self, a: ElementId, b: ElementId) -> bool {
        self.elements[a.0].parent == self.elements[b.0].parent
    }
}

/// Convenience builder for hosts and tests that assemble snapshots in code
/// rather than deserializing them. Parent handles can only name elements
/// already pushed, so the resulting tree is valid by construction.
#[derive(Debug)]
pub struct SnapshotBuilder {
    viewport: Viewport,
    scroll: ScrollOffset,
    elements: Vec<ElementRecord>,
}

impl SnapshotBuilder {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport: Viewport {
                width: viewport_width,
                height: viewport_height,
            },
            scroll: ScrollOffset::default(),
            elements: Vec::new(),
        }
    }

    pub fn scrolled(mut self, x: f32, y: f32) -> Self {
        self.scroll = ScrollOffset { x, y };
        self
    }

    pub fn element(&mut self, tag: &str, parent: Option<ElementId>, rect: Rect) -> ElementId {
        self.elements.push(ElementRecord {
            tag: tag.to_string(),
            classes: Vec::new(),
            id: None,
            parent: parent.map(|p| p.0),
            rect,
            style: ComputedStyle::default(),
        });
        ElementId(self.elements.len() - 1)
    }

    pub fn classes(&mut self, element: ElementId, classes: &[&str]) -> &mut Self {
        self.elements[element.0].classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn dom_id(&mut self, element: ElementId, id: &str) -> &mut Self {
        self.elements[element.0].id = Some(id.to_string());
        self
    }

    pub fn style(&mut self, element: ElementId, style: ComputedStyle) -> &mut Self {
        self.elements[element.0].style = style;
        self
    }

    pub fn build(self) -> DocumentSnapshot {
        // Parent indices are valid by construction, so this cannot fail.
        DocumentSnapshot::from_records(self.viewport, self.scroll, self.elements)
            .unwrap_or_else(|_| unreachable!("builder produces topologically ordered elements"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f32, top: f32, width: f32, height: f32) -> Rect {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn depths_follow_parent_chain() {
        let mut builder = SnapshotBuilder::new(1280.0, 800.0);
        let root = builder.element("main", None, rect(0.0, 0.0, 1280.0, 800.0));
        let child = builder.element("div", Some(root), rect(10.0, 10.0, 200.0, 100.0));
        let grandchild = builder.element("span", Some(child), rect(20.0, 20.0, 50.0, 20.0));
        let doc = builder.build();

        assert_eq!(doc.depth(root), 0);
        assert_eq!(doc.depth(child), 1);
        assert_eq!(doc.depth(grandchild), 2);
        assert!(doc.is_ancestor(root, grandchild));
        assert!(doc.is_ancestor(child, grandchild));
        assert!(!doc.is_ancestor(grandchild, root));
        assert!(!doc.is_ancestor(child, child));
    }

    #[test]
    fn page_rect_applies_scroll_offset() {
        let mut builder = SnapshotBuilder::new(1280.0, 800.0).scrolled(100.0, 250.0);
        let element = builder.element("div", None, rect(30.0, 40.0, 200.0, 100.0));
        let doc = builder.build();

        let page = doc.page_rect(element);
        assert_eq!(page.left, 130.0);
        assert_eq!(page.top, 290.0);
        assert_eq!(doc.viewport_rect(element).left, 30.0);
    }

    #[test]
    fn forward_parent_reference_is_rejected() {
        let records = vec![ElementRecord {
            tag: "div".to_string(),
            classes: Vec::new(),
            id: None,
            parent: Some(3),
            rect: rect(0.0, 0.0, 100.0, 100.0),
            style: ComputedStyle::default(),
        }];
        let viewport = Viewport {
            width: 800.0,
            height: 600.0,
        };
        let result = DocumentSnapshot::from_records(viewport, ScrollOffset::default(), records);
        assert!(matches!(
            result,
            Err(SnapshotError::ForwardParent {
                element: 0,
                parent: 3
            })
        ));
    }

    #[test]
    fn snapshot_parses_from_json_with_defaults() {
        let doc = DocumentSnapshot::from_json(
            r#"{
                "viewport": { "width": 1024, "height": 768 },
                "elements": [
                    { "tag": "div", "classes": ["card"], "rect": { "left": 5, "top": 5, "width": 300, "height": 120 } },
                    { "tag": "span", "parent": 0, "rect": { "left": 12, "top": 12, "width": 80, "height": 20 } }
                ]
            }"#,
        )
        .expect("snapshot should parse");

        assert_eq!(doc.len(), 2);
        let span = doc.get(1).unwrap();
        assert_eq!(doc.tag(span), "span");
        assert_eq!(doc.depth(span), 1);
        assert!(doc.style(span).is_rendered());
        assert_eq!(doc.scroll().x, 0.0);
    }
}
