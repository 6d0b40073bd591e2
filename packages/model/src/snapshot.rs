//! # Document Snapshots
//!
//! A [`DocumentSnapshot`] is the persisted form of a page: the ordered
//! children of the page root. It is the only shape the storage API reads and
//! writes, so every snapshot is validated on construction:
//!
//! - ids are unique across the whole tree and never collide with the root id
//! - no page-root element appears below the root
//!
//! Older documents stored the root itself as a single `__body` element.
//! Those are accepted and unwrapped: the wrapper's children become the
//! snapshot's elements, its name and styles become the root's. A snapshot
//! whose root carries a custom name or styles is written back in that
//! wrapped form, otherwise as the bare element array.

use crate::element::{Element, ElementKind, Styles, ROOT_ID};
use crate::error::{SnapshotError, SnapshotResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Element>", into = "Vec<Element>")]
pub struct DocumentSnapshot {
    root_name: String,
    root_styles: Styles,
    elements: Vec<Element>,
}

impl DocumentSnapshot {
    /// Validate `elements` as the children of a page root
    pub fn new(elements: Vec<Element>) -> SnapshotResult<Self> {
        let mut snapshot = Self::default();
        let elements = match unwrap_legacy_root(elements) {
            Ok(mut root) => {
                let children = root.children_mut().map(std::mem::take).unwrap_or_default();
                snapshot.root_name = root.name;
                snapshot.root_styles = root.styles;
                children
            }
            Err(elements) => elements,
        };

        let mut seen = HashSet::new();
        seen.insert(ROOT_ID.to_string());
        for element in &elements {
            validate_subtree(element, &mut seen)?;
        }

        snapshot.elements = elements;
        Ok(snapshot)
    }

    /// Set the page root's own name and styles
    pub fn with_root(mut self, name: impl Into<String>, styles: Styles) -> Self {
        self.root_name = name.into();
        self.root_styles = styles;
        self
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a stored document: either a bare element array or an object
    /// with an `elements` array (the storage API's variant record).
    pub fn from_json(source: &str) -> SnapshotResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> SnapshotResult<Self> {
        let elements = match value {
            Value::Object(mut map) => map.remove("elements").unwrap_or(Value::Array(vec![])),
            other => other,
        };

        let elements: Vec<Element> = serde_json::from_value(elements)?;
        Self::new(elements)
    }

    pub fn to_json(&self, pretty: bool) -> SnapshotResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Request body the storage API expects on save
    pub fn to_save_body(&self) -> SnapshotResult<Value> {
        Ok(json!({ "elements": serde_json::to_value(self)? }))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn root_styles(&self) -> &Styles {
        &self.root_styles
    }

    /// Whether the root differs from a fresh one and needs the wrapped form
    pub fn has_custom_root(&self) -> bool {
        !self.root_styles.is_empty() || self.root_name != ElementKind::PageRoot.default_name()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of elements at every depth
    pub fn node_count(&self) -> usize {
        self.elements.iter().map(Element::node_count).sum()
    }
}

impl Default for DocumentSnapshot {
    fn default() -> Self {
        Self {
            root_name: ElementKind::PageRoot.default_name().to_string(),
            root_styles: Styles::new(),
            elements: Vec::new(),
        }
    }
}

impl TryFrom<Vec<Element>> for DocumentSnapshot {
    type Error = SnapshotError;

    fn try_from(elements: Vec<Element>) -> Result<Self, Self::Error> {
        Self::new(elements)
    }
}

impl From<DocumentSnapshot> for Vec<Element> {
    fn from(snapshot: DocumentSnapshot) -> Self {
        if !snapshot.has_custom_root() {
            return snapshot.elements;
        }

        let mut root = Element::new(ROOT_ID, ElementKind::PageRoot)
            .with_name(snapshot.root_name)
            .with_styles(snapshot.root_styles);
        if let Some(children) = root.children_mut() {
            *children = snapshot.elements;
        }
        vec![root]
    }
}

/// The single `__body` wrapper of a legacy document, or the elements untouched
fn unwrap_legacy_root(mut elements: Vec<Element>) -> Result<Element, Vec<Element>> {
    let is_legacy = elements.len() == 1 && elements[0].kind() == ElementKind::PageRoot;
    match elements.pop() {
        Some(root) if is_legacy => Ok(root),
        Some(other) => {
            elements.push(other);
            Err(elements)
        }
        None => Err(elements),
    }
}

fn validate_subtree(element: &Element, seen: &mut HashSet<String>) -> SnapshotResult<()> {
    if element.kind() == ElementKind::PageRoot {
        return Err(SnapshotError::NestedRoot(element.id().to_string()));
    }

    if !seen.insert(element.id().to_string()) {
        return Err(SnapshotError::DuplicateId(element.id().to_string()));
    }

    for child in element.children().unwrap_or_default() {
        validate_subtree(child, seen)?;
    }

    Ok(())
}
