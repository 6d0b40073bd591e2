//! # Undo/Redo History
//!
//! Tracks tree checkpoints so edits can be undone and redone.
//!
//! ## Design
//!
//! - Each successful tree edit records the tree as it was before the edit
//! - Undo swaps the current tree for the last checkpoint and pushes the
//!   current tree onto the redo stack
//! - New edits clear the redo stack
//! - Batches group several edits into one undo step
//! - View-state commands (selection, device, modes) are never recorded
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! let before = state.tree().clone();
//! state.apply(command, &mut ids)?;
//! history.record(before, Some("Add text"));
//!
//! let previous = history.undo(state.tree().clone());
//! ```

use crate::tree::ElementTree;
use std::collections::VecDeque;

/// A tree state the user can return to
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub tree: ElementTree,

    /// Optional description of the edit that followed this checkpoint
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct History {
    /// Checkpoints before applied edits (most recent last)
    undo_stack: VecDeque<Checkpoint>,

    /// Checkpoints after undone edits (most recent last)
    redo_stack: Vec<Checkpoint>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open batch: `None` until begun, then the first pre-edit tree
    batch: Option<PendingBatch>,
}

#[derive(Debug, Default)]
struct PendingBatch {
    start: Option<ElementTree>,
    description: Option<String>,
}

impl History {
    /// Create a history with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
            batch: None,
        }
    }

    /// Record the tree as it was before a successful edit
    pub fn record(&mut self, before: ElementTree, description: Option<String>) {
        if let Some(batch) = &mut self.batch {
            if batch.start.is_none() {
                batch.start = Some(before);
            }
            if batch.description.is_none() {
                batch.description = description;
            }
            self.redo_stack.clear();
            return;
        }

        self.push(Checkpoint {
            tree: before,
            description,
        });
    }

    /// Start grouping edits into one undo step
    pub fn begin_batch(&mut self) {
        if self.batch.is_none() {
            self.batch = Some(PendingBatch::default());
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.batch {
            batch.description = Some(description.into());
        }
    }

    /// Close the batch; it becomes one undo step if it recorded anything
    pub fn end_batch(&mut self) {
        if let Some(PendingBatch {
            start: Some(tree),
            description,
        }) = self.batch.take()
        {
            self.push(Checkpoint { tree, description });
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    fn push(&mut self, checkpoint: Checkpoint) {
        self.undo_stack.push_back(checkpoint);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }

        self.redo_stack.clear();
    }

    /// Step back. Returns the tree to restore, or `None` if nothing to undo.
    pub fn undo(&mut self, current: ElementTree) -> Option<ElementTree> {
        self.end_batch();
        let checkpoint = self.undo_stack.pop_back()?;

        self.redo_stack.push(Checkpoint {
            tree: current,
            description: checkpoint.description.clone(),
        });

        Some(checkpoint.tree)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: ElementTree) -> Option<ElementTree> {
        let checkpoint = self.redo_stack.pop()?;

        self.undo_stack.push_back(Checkpoint {
            tree: current,
            description: checkpoint.description.clone(),
        });

        Some(checkpoint.tree)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all checkpoints, e.g. after a document load
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|checkpoint| checkpoint.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|checkpoint| checkpoint.description.as_deref())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Position;
    use pagesmith_model::{Element, ElementKind, ROOT_ID};

    fn tree_with(ids: &[&str]) -> ElementTree {
        let mut tree = ElementTree::new();
        for id in ids {
            tree.insert_child(ROOT_ID, Position::Append, Element::new(*id, ElementKind::Text))
                .unwrap();
        }
        tree
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::new();
        let v0 = tree_with(&[]);
        let v1 = tree_with(&["a"]);

        history.record(v0.clone(), Some("Add a".to_string()));
        assert_eq!(history.undo_description(), Some("Add a"));

        let restored = history.undo(v1.clone()).unwrap();
        assert_eq!(restored, v0);
        assert_eq!(history.redo_levels(), 1);
        assert_eq!(history.redo_description(), Some("Add a"));

        let redone = history.redo(restored).unwrap();
        assert_eq!(redone, v1);
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_nothing_to_undo() {
        let mut history = History::new();
        assert!(history.undo(tree_with(&[])).is_none());
        assert!(history.redo(tree_with(&[])).is_none());
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut history = History::new();

        history.record(tree_with(&[]), None);
        history.undo(tree_with(&["a"]));
        assert_eq!(history.redo_levels(), 1);

        history.record(tree_with(&[]), None);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_batch_is_one_step() {
        let mut history = History::new();

        history.begin_batch();
        history.set_batch_description("Build hero");
        history.record(tree_with(&[]), None);
        history.record(tree_with(&["a"]), None);
        history.end_batch();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Build hero"));

        let restored = history.undo(tree_with(&["a", "b"])).unwrap();
        assert_eq!(restored, tree_with(&[]));
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let mut history = History::new();

        history.begin_batch();
        history.end_batch();

        assert_eq!(history.undo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(2);

        for _ in 0..3 {
            history.record(tree_with(&[]), None);
        }

        assert_eq!(history.undo_levels(), 2);
    }
}
