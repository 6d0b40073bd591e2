//! # Element Nodes
//!
//! The page document is a tree of [`Element`]s. Every element carries a
//! [`ElementKind`] tag from a closed set, and the tag alone decides the shape
//! of its content:
//!
//! - **Container kinds** hold an ordered list of child elements
//! - **Leaf kinds** hold a [`LeafContent`] payload (text, media source, link)
//!
//! The kind and content of an element are private so the two can never
//! disagree. Deserialization goes through [`RawElement`] and rejects any
//! document where they do.

use crate::error::{SnapshotError, SnapshotResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of the page root. There is exactly one root per document.
pub const ROOT_ID: &str = "__body";

/// Closed enumeration of element types, with their wire tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "heading")]
    Heading,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "RichText")]
    RichText,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "textarea")]
    TextArea,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "fileUpload")]
    FileUpload,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "2Col")]
    TwoColumn,
    #[serde(rename = "3Col")]
    ThreeColumn,
    #[serde(rename = "HFlex")]
    HorizontalFlex,
    #[serde(rename = "VFlex")]
    VerticalFlex,
    #[serde(rename = "Grid")]
    Grid,
    #[serde(rename = "__body")]
    PageRoot,
}

impl ElementKind {
    pub const ALL: [ElementKind; 21] = [
        ElementKind::Text,
        ElementKind::Heading,
        ElementKind::Paragraph,
        ElementKind::RichText,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::Link,
        ElementKind::Input,
        ElementKind::TextArea,
        ElementKind::Checkbox,
        ElementKind::Radio,
        ElementKind::Select,
        ElementKind::Button,
        ElementKind::FileUpload,
        ElementKind::Container,
        ElementKind::TwoColumn,
        ElementKind::ThreeColumn,
        ElementKind::HorizontalFlex,
        ElementKind::VerticalFlex,
        ElementKind::Grid,
        ElementKind::PageRoot,
    ];

    /// Whether elements of this kind own a list of children
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ElementKind::Container
                | ElementKind::TwoColumn
                | ElementKind::ThreeColumn
                | ElementKind::HorizontalFlex
                | ElementKind::VerticalFlex
                | ElementKind::Grid
                | ElementKind::PageRoot
        )
    }

    /// Tag used in persisted documents
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::RichText => "RichText",
            ElementKind::Image => "image",
            ElementKind::Video => "video",
            ElementKind::Link => "link",
            ElementKind::Input => "input",
            ElementKind::TextArea => "textarea",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Radio => "radio",
            ElementKind::Select => "select",
            ElementKind::Button => "button",
            ElementKind::FileUpload => "fileUpload",
            ElementKind::Container => "container",
            ElementKind::TwoColumn => "2Col",
            ElementKind::ThreeColumn => "3Col",
            ElementKind::HorizontalFlex => "HFlex",
            ElementKind::VerticalFlex => "VFlex",
            ElementKind::Grid => "Grid",
            ElementKind::PageRoot => "__body",
        }
    }

    /// Label given to new elements of this kind
    pub fn default_name(self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Heading => "Heading",
            ElementKind::Paragraph => "Paragraph",
            ElementKind::RichText => "Rich Text",
            ElementKind::Image => "Image",
            ElementKind::Video => "Video",
            ElementKind::Link => "Link",
            ElementKind::Input => "Input",
            ElementKind::TextArea => "Text Area",
            ElementKind::Checkbox => "Checkbox",
            ElementKind::Radio => "Radio",
            ElementKind::Select => "Select",
            ElementKind::Button => "Button",
            ElementKind::FileUpload => "File Upload",
            ElementKind::Container => "Container",
            ElementKind::TwoColumn => "Two Columns",
            ElementKind::ThreeColumn => "Three Columns",
            ElementKind::HorizontalFlex => "H Flex",
            ElementKind::VerticalFlex => "V Flex",
            ElementKind::Grid => "Grid",
            ElementKind::PageRoot => "Body",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Matches wire tags exactly, the same rule documents are read with
impl FromStr for ElementKind {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| SnapshotError::UnknownKind(s.to_string()))
    }
}

/// A single style property value. Numbers keep their original JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Number(value.into())
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(value.into())
    }
}

/// Style property name → value
pub type Styles = BTreeMap<String, StyleValue>;

/// Kind-specific payload of a leaf element.
///
/// Unknown keys are kept in `extra` so a load/save cycle never drops data.
/// The same goes for known keys holding anything but a string (an explicit
/// `null`, a number): they stay in `extra` and are written back as found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BTreeMap<String, Value>")]
pub struct LeafContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl From<BTreeMap<String, Value>> for LeafContent {
    fn from(mut extra: BTreeMap<String, Value>) -> Self {
        let mut take = |key: &str| match extra.remove(key) {
            Some(Value::String(value)) => Some(value),
            Some(other) => {
                extra.insert(key.to_string(), other);
                None
            }
            None => None,
        };

        let inner_text = take("innerText");
        let src = take("src");
        let href = take("href");
        Self {
            inner_text,
            src,
            href,
            extra,
        }
    }
}

impl LeafContent {
    pub fn text(inner_text: impl Into<String>) -> Self {
        Self {
            inner_text: Some(inner_text.into()),
            ..Default::default()
        }
    }

    pub fn source(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    pub fn link(inner_text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            inner_text: Some(inner_text.into()),
            href: Some(href.into()),
            ..Default::default()
        }
    }
}

/// Element content: children for containers, payload for leaves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Children(Vec<Element>),
    Leaf(LeafContent),
}

impl Content {
    fn empty_for(kind: ElementKind) -> Self {
        if kind.is_container() {
            Content::Children(Vec::new())
        } else {
            Content::Leaf(LeafContent::default())
        }
    }
}

/// One node of the page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct Element {
    id: String,

    #[serde(rename = "type")]
    kind: ElementKind,

    /// Human-readable label, not required to be unique
    pub name: String,

    pub styles: Styles,

    content: Content,
}

impl Element {
    /// Create an element with empty content and the kind's default name
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: kind.default_name().to_string(),
            styles: Styles::new(),
            content: Content::empty_for(kind),
        }
    }

    /// Create a container element holding `children`
    pub fn container(
        id: impl Into<String>,
        kind: ElementKind,
        children: Vec<Element>,
    ) -> SnapshotResult<Self> {
        let id = id.into();
        if !kind.is_container() {
            return Err(SnapshotError::content_mismatch(id, kind));
        }

        let mut element = Self::new(id, kind);
        element.content = Content::Children(children);
        Ok(element)
    }

    /// Create a leaf element with the given payload
    pub fn leaf(
        id: impl Into<String>,
        kind: ElementKind,
        content: LeafContent,
    ) -> SnapshotResult<Self> {
        let id = id.into();
        if kind.is_container() {
            return Err(SnapshotError::content_mismatch(id, kind));
        }

        let mut element = Self::new(id, kind);
        element.content = Content::Leaf(content);
        Ok(element)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles.extend(styles);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Children of a container, `None` for leaves
    pub fn children(&self) -> Option<&[Element]> {
        match &self.content {
            Content::Children(children) => Some(children),
            Content::Leaf(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            Content::Leaf(_) => None,
        }
    }

    /// Payload of a leaf, `None` for containers
    pub fn leaf_content(&self) -> Option<&LeafContent> {
        match &self.content {
            Content::Leaf(leaf) => Some(leaf),
            Content::Children(_) => None,
        }
    }

    pub fn leaf_content_mut(&mut self) -> Option<&mut LeafContent> {
        match &mut self.content {
            Content::Leaf(leaf) => Some(leaf),
            Content::Children(_) => None,
        }
    }

    /// Depth-first search of this element and its descendants
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }

        self.children()?.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }

        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Number of elements in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(Element::node_count).sum())
            .unwrap_or(0)
    }

    /// Give this element and every descendant a new id, preserving order,
    /// kinds, and content. Only meaningful before the element joins a tree.
    pub fn reassign_ids(&mut self, next_id: &mut dyn FnMut() -> String) {
        self.id = next_id();
        if let Some(children) = self.children_mut() {
            for child in children {
                child.reassign_ids(next_id);
            }
        }
    }
}

/// Wire form of an element before kind/content validation
#[derive(Debug, Deserialize)]
pub struct RawElement {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default)]
    pub content: Option<Value>,
}

impl TryFrom<RawElement> for Element {
    type Error = SnapshotError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let content = match raw.content {
            None | Some(Value::Null) => Content::empty_for(raw.kind),
            Some(Value::Array(items)) => {
                if !raw.kind.is_container() {
                    return Err(SnapshotError::content_mismatch(raw.id, raw.kind));
                }
                let children = items
                    .into_iter()
                    .map(serde_json::from_value::<Element>)
                    .collect::<Result<Vec<_>, _>>()?;
                Content::Children(children)
            }
            Some(value @ Value::Object(_)) => {
                if raw.kind.is_container() {
                    return Err(SnapshotError::content_mismatch(raw.id, raw.kind));
                }
                Content::Leaf(serde_json::from_value(value)?)
            }
            Some(_) => return Err(SnapshotError::content_mismatch(raw.id, raw.kind)),
        };

        Ok(Element {
            name: raw
                .name
                .unwrap_or_else(|| raw.kind.default_name().to_string()),
            id: raw.id,
            kind: raw.kind,
            styles: raw.styles,
            content,
        })
    }
}

/// Partial update for an element: styles merge key by key, the leaf payload
/// is replaced wholesale, the name is replaced when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<LeafContent>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.styles
            .get_or_insert_with(Styles::new)
            .insert(property.into(), value.into());
        self
    }

    pub fn content(mut self, content: LeafContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.styles.is_none() && self.content.is_none()
    }

    /// Merge this patch into `element`. Callers check kind compatibility first:
    /// a content patch on a container is ignored here.
    pub fn merge_into(&self, element: &mut Element) {
        if let Some(name) = &self.name {
            element.name = name.clone();
        }

        if let Some(styles) = &self.styles {
            for (property, value) in styles {
                element.styles.insert(property.clone(), value.clone());
            }
        }

        if let (Some(content), Some(leaf)) = (&self.content, element.leaf_content_mut()) {
            *leaf = content.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_kinds() {
        let containers: Vec<_> = ElementKind::ALL
            .iter()
            .filter(|kind| kind.is_container())
            .collect();

        assert_eq!(containers.len(), 7);
        assert!(ElementKind::PageRoot.is_container());
        assert!(!ElementKind::Link.is_container());
    }

    #[test]
    fn test_kind_tags_roundtrip_through_from_str() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.tag().parse::<ElementKind>().unwrap(), kind);
        }

        assert!("marquee".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_kind_tags_are_case_sensitive_everywhere() {
        assert!("hflex".parse::<ElementKind>().is_err());
        assert!(serde_json::from_value::<ElementKind>(json!("hflex")).is_err());

        assert_eq!("HFlex".parse::<ElementKind>().unwrap(), ElementKind::HorizontalFlex);
        assert_eq!(
            serde_json::from_value::<ElementKind>(json!("HFlex")).unwrap(),
            ElementKind::HorizontalFlex
        );
    }

    #[test]
    fn test_deserialize_leaf() {
        let element: Element = serde_json::from_value(json!({
            "id": "a",
            "type": "link",
            "name": "Link",
            "styles": { "color": "black", "fontSize": 36 },
            "content": { "innerText": "Home", "href": "/", "target": "_blank" }
        }))
        .unwrap();

        assert_eq!(element.kind(), ElementKind::Link);
        let leaf = element.leaf_content().unwrap();
        assert_eq!(leaf.inner_text.as_deref(), Some("Home"));
        assert_eq!(leaf.href.as_deref(), Some("/"));
        assert_eq!(leaf.extra.get("target"), Some(&json!("_blank")));
        assert_eq!(element.styles.get("fontSize"), Some(&StyleValue::from(36i64)));
    }

    #[test]
    fn test_leaf_payload_roundtrips_verbatim() {
        let content = json!({ "innerText": null, "src": 42, "href": "/", "alt": "Logo" });
        let element: Element = serde_json::from_value(json!({
            "id": "i",
            "type": "image",
            "content": content.clone()
        }))
        .unwrap();

        let leaf = element.leaf_content().unwrap();
        assert_eq!(leaf.inner_text, None);
        assert_eq!(leaf.src, None);
        assert_eq!(leaf.href.as_deref(), Some("/"));

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["content"], content);
    }

    #[test]
    fn test_serialize_keeps_wire_shape() {
        let element = Element::leaf("t", ElementKind::Text, LeafContent::text("hi"))
            .unwrap()
            .with_style("color", "red");

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "t",
                "type": "text",
                "name": "Text",
                "styles": { "color": "red" },
                "content": { "innerText": "hi" }
            })
        );
    }

    #[test]
    fn test_rejects_children_on_leaf() {
        let result = serde_json::from_value::<Element>(json!({
            "id": "b",
            "type": "button",
            "content": []
        }));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("leaf payload"), "{}", message);
    }

    #[test]
    fn test_rejects_payload_on_container() {
        let result = serde_json::from_value::<Element>(json!({
            "id": "c",
            "type": "container",
            "content": { "innerText": "nope" }
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_content_and_name_get_defaults() {
        let element: Element = serde_json::from_value(json!({ "id": "g", "type": "Grid" })).unwrap();

        assert_eq!(element.name, "Grid");
        assert_eq!(element.children().unwrap().len(), 0);
    }

    #[test]
    fn test_typed_constructors_enforce_kind() {
        assert!(Element::container("x", ElementKind::Image, vec![]).is_err());
        assert!(Element::leaf("x", ElementKind::Grid, LeafContent::default()).is_err());
    }

    #[test]
    fn test_find_and_reassign_ids() {
        let inner = Element::new("inner", ElementKind::Text);
        let mut outer = Element::container("outer", ElementKind::Container, vec![inner]).unwrap();

        assert_eq!(outer.find("inner").unwrap().kind(), ElementKind::Text);
        assert_eq!(outer.node_count(), 2);

        let mut counter = 0;
        outer.reassign_ids(&mut || {
            counter += 1;
            format!("n{}", counter)
        });

        assert_eq!(outer.id(), "n1");
        assert_eq!(outer.children().unwrap()[0].id(), "n2");
        assert!(outer.find("inner").is_none());
    }

    #[test]
    fn test_patch_merges_styles_and_replaces_content() {
        let mut element = Element::leaf("l", ElementKind::Link, LeafContent::link("Go", "#"))
            .unwrap()
            .with_style("color", "black");

        ElementPatch::new()
            .style("fontWeight", "bold")
            .content(LeafContent::text("Gone"))
            .merge_into(&mut element);

        assert_eq!(element.styles.len(), 2);
        let leaf = element.leaf_content().unwrap();
        assert_eq!(leaf.inner_text.as_deref(), Some("Gone"));
        assert_eq!(leaf.href, None);
    }
}
