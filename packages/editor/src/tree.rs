//! # Tree Store
//!
//! Owns the page root and its descendants, and provides the locate / insert /
//! replace / remove primitives the Mutation Engine is built from.
//!
//! Every primitive validates before it touches the tree, so a failed call
//! leaves the tree exactly as it was.

use crate::errors::MutationError;
use pagesmith_common::collect_ids;
use pagesmith_model::{
    DocumentSnapshot, Element, ElementKind, ElementPatch, SnapshotResult, ROOT_ID,
};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Where to place a child inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Append,
    /// Clamped to the number of children
    At(usize),
}

impl Position {
    fn resolve(self, len: usize) -> usize {
        match self {
            Position::Append => len,
            Position::At(index) => index.min(len),
        }
    }
}

/// Result of [`ElementTree::locate`]: the node plus the containers above it
#[derive(Debug)]
pub struct NodePath<'a> {
    pub node: &'a Element,

    /// Containers from the root down to the node's parent
    pub ancestors: Vec<&'a Element>,

    /// Child index taken at each level, starting at the root
    pub indices: Vec<usize>,
}

impl<'a> NodePath<'a> {
    pub fn parent(&self) -> Option<&'a Element> {
        self.ancestors.last().copied()
    }

    /// Number of containers above the node (0 for the root)
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn has_ancestor(&self, id: &str) -> bool {
        self.ancestors.iter().any(|ancestor| ancestor.id() == id)
    }
}

/// The page tree, rooted at a single page-root element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTree {
    root: Element,
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            root: Element::new(ROOT_ID, ElementKind::PageRoot),
        }
    }

    /// Build a tree whose root holds the snapshot's elements, name and styles
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Self {
        let mut tree = Self::new();
        tree.root.name = snapshot.root_name().to_string();
        tree.root.styles = snapshot.root_styles().clone();
        if let Some(children) = tree.root.children_mut() {
            *children = snapshot.into_elements();
        }
        tree
    }

    pub fn to_snapshot(&self) -> SnapshotResult<DocumentSnapshot> {
        Ok(DocumentSnapshot::new(self.elements().to_vec())?
            .with_root(self.root.name.clone(), self.root.styles.clone()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_id(&self) -> &str {
        self.root.id()
    }

    /// The root's children, in order
    pub fn elements(&self) -> &[Element] {
        self.root.children().unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Number of elements, root included
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn ids(&self) -> HashSet<String> {
        collect_ids(&self.root).into_iter().collect()
    }

    /// Depth-first search returning the node and its ancestor chain
    pub fn locate(&self, id: &str) -> Result<NodePath<'_>, MutationError> {
        let mut ancestors = Vec::new();
        let mut indices = Vec::new();

        let node = locate_in(&self.root, id, &mut ancestors, &mut indices)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

        Ok(NodePath {
            node,
            ancestors,
            indices,
        })
    }

    /// Insert `node` into the container `parent_id`, returning its index.
    ///
    /// Any kind may be nested in any container. The caller is responsible
    /// for `node` carrying ids that are not already in the tree.
    pub fn insert_child(
        &mut self,
        parent_id: &str,
        position: Position,
        node: Element,
    ) -> Result<usize, MutationError> {
        if contains_page_root(&node) {
            return Err(MutationError::RootImmutable);
        }

        let parent = self
            .root
            .find_mut(parent_id)
            .ok_or_else(|| MutationError::ContainerNotFound(parent_id.to_string()))?;

        let children = parent
            .children_mut()
            .ok_or_else(|| MutationError::NotAContainer(parent_id.to_string()))?;

        let index = position.resolve(children.len());
        children.insert(index, node);
        Ok(index)
    }

    /// Shallow-merge `patch` into the node at `id`
    pub fn replace_node(&mut self, id: &str, patch: &ElementPatch) -> Result<(), MutationError> {
        let node = self
            .root
            .find_mut(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

        if patch.content.is_some() && node.is_container() {
            return Err(MutationError::ContentMismatch {
                id: id.to_string(),
                kind: node.kind(),
            });
        }

        patch.merge_into(node);
        Ok(())
    }

    /// Excise the node and its subtree, returning it
    pub fn remove_node(&mut self, id: &str) -> Result<Element, MutationError> {
        if id == self.root_id() {
            return Err(MutationError::RootImmutable);
        }

        let indices = self.locate(id)?.indices;
        let (last, parent_path) = indices
            .split_last()
            .ok_or(MutationError::RootImmutable)?;

        self.node_at_mut(parent_path)
            .and_then(Element::children_mut)
            .filter(|children| *last < children.len())
            .map(|children| children.remove(*last))
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
    }

    /// Relocate a node and its subtree under `new_parent_id`
    pub fn move_node(
        &mut self,
        id: &str,
        new_parent_id: &str,
        position: Position,
    ) -> Result<usize, MutationError> {
        if id == self.root_id() {
            return Err(MutationError::RootImmutable);
        }

        let path = self.locate(id)?;
        let parent = self
            .find(new_parent_id)
            .ok_or_else(|| MutationError::ContainerNotFound(new_parent_id.to_string()))?;

        if !parent.is_container() {
            return Err(MutationError::NotAContainer(new_parent_id.to_string()));
        }

        if path.node.find(new_parent_id).is_some() {
            return Err(MutationError::CycleDetected);
        }

        let node = self.remove_node(id)?;
        self.insert_child(new_parent_id, position, node)
    }

    fn node_at_mut(&mut self, indices: &[usize]) -> Option<&mut Element> {
        let mut node = &mut self.root;
        for &index in indices {
            node = node.children_mut()?.get_mut(index)?;
        }
        Some(node)
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes as the root's children, the persisted document shape
impl Serialize for ElementTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.elements().serialize(serializer)
    }
}

fn locate_in<'a>(
    node: &'a Element,
    id: &str,
    ancestors: &mut Vec<&'a Element>,
    indices: &mut Vec<usize>,
) -> Option<&'a Element> {
    if node.id() == id {
        return Some(node);
    }

    let children = node.children()?;
    ancestors.push(node);
    for (index, child) in children.iter().enumerate() {
        indices.push(index);
        if let Some(found) = locate_in(child, id, ancestors, indices) {
            return Some(found);
        }
        indices.pop();
    }
    ancestors.pop();

    None
}

fn contains_page_root(node: &Element) -> bool {
    node.kind() == ElementKind::PageRoot
        || node
            .children()
            .is_some_and(|children| children.iter().any(contains_page_root))
}
