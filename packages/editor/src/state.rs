//! # Editor State and the Mutation Engine
//!
//! [`EditorState`] is the full snapshot a presentation layer reads: the tree
//! plus the view state. [`EditorState::apply`] is the transition function.
//! It is deterministic for a given [`IdSource`] and all-or-nothing: every
//! tree primitive it calls validates before writing, and the view state is
//! only touched after the tree operation has succeeded.

use crate::commands::Command;
use crate::errors::MutationError;
use crate::tree::{ElementTree, Position};
use crate::view::{Device, ViewState};
use pagesmith_model::{Element, IdSource};
use serde::Serialize;
use tracing::debug;

/// Side information about a successful transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Id given to the root of an inserted template
    pub created_id: Option<String>,

    pub tree_changed: bool,
}

impl Transition {
    fn view_only() -> Self {
        Self::default()
    }

    fn tree() -> Self {
        Self {
            created_id: None,
            tree_changed: true,
        }
    }

    fn created(id: String) -> Self {
        Self {
            created_id: Some(id),
            tree_changed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EditorState {
    #[serde(rename = "elements")]
    tree: ElementTree,

    #[serde(flatten)]
    view: ViewState,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(device: Device) -> Self {
        Self {
            tree: ElementTree::new(),
            view: ViewState::with_device(device),
        }
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The selected element, if any
    pub fn selected(&self) -> Option<&Element> {
        self.view
            .selected_id()
            .and_then(|id| self.tree.find(id))
    }

    /// Apply one command in place. On error nothing has changed.
    pub fn apply(
        &mut self,
        command: Command,
        ids: &mut dyn IdSource,
    ) -> Result<Transition, MutationError> {
        match command {
            Command::LoadDocument {
                elements,
                with_live,
            } => {
                self.tree = ElementTree::from_snapshot(elements);
                self.view.select(None);
                self.view.set_live_mode(with_live);
                Ok(Transition::tree())
            }

            Command::AddElement {
                container_id,
                element,
            } => self.insert_template(&container_id, Position::Append, element, ids),

            Command::InsertElement {
                container_id,
                index,
                element,
            } => self.insert_template(&container_id, Position::At(index), element, ids),

            Command::UpdateElement { id, patch } => {
                self.tree.replace_node(&id, &patch)?;
                Ok(Transition::tree())
            }

            Command::DeleteElement { id } => {
                let removed = self.tree.remove_node(&id)?;
                debug!(node_id = %id, removed = removed.node_count(), "Removed subtree");
                self.reconcile_selection();
                Ok(Transition::tree())
            }

            Command::MoveElement {
                id,
                new_parent_id,
                index,
            } => {
                let position = index.map(Position::At).unwrap_or_default();
                self.tree.move_node(&id, &new_parent_id, position)?;
                Ok(Transition::tree())
            }

            Command::SelectElement { id } => {
                let id = id.filter(|id| self.tree.contains(id));
                self.view.select(id);
                Ok(Transition::view_only())
            }

            Command::TogglePreviewMode => {
                self.view.set_preview_mode(!self.view.preview_mode());
                Ok(Transition::view_only())
            }

            Command::ToggleLiveMode => {
                self.view.set_live_mode(!self.view.live_mode());
                Ok(Transition::view_only())
            }

            Command::SetPreviewMode { value } => {
                self.view.set_preview_mode(value);
                Ok(Transition::view_only())
            }

            Command::SetLiveMode { value } => {
                self.view.set_live_mode(value);
                Ok(Transition::view_only())
            }

            Command::ChangeDevice { device } => {
                self.view.set_device(device);
                Ok(Transition::view_only())
            }
        }
    }

    /// Swap in a tree from history, keeping the selection valid
    pub(crate) fn restore_tree(&mut self, tree: ElementTree) -> ElementTree {
        let previous = std::mem::replace(&mut self.tree, tree);
        self.reconcile_selection();
        previous
    }

    fn insert_template(
        &mut self,
        container_id: &str,
        position: Position,
        template: Element,
        ids: &mut dyn IdSource,
    ) -> Result<Transition, MutationError> {
        let element = self.instantiate(template, ids);
        let id = element.id().to_string();

        let index = self.tree.insert_child(container_id, position, element)?;
        debug!(node_id = %id, container_id = %container_id, index, "Inserted element");

        Ok(Transition::created(id))
    }

    /// Give a template fresh ids that do not occur anywhere in the tree
    fn instantiate(&self, mut template: Element, ids: &mut dyn IdSource) -> Element {
        let mut taken = self.tree.ids();
        template.reassign_ids(&mut || loop {
            let id = ids.next_id();
            if taken.insert(id.clone()) {
                break id;
            }
        });
        template
    }

    fn reconcile_selection(&mut self) {
        let dangling = self
            .view
            .selected_id()
            .is_some_and(|id| !self.tree.contains(id));

        if dangling {
            self.view.select(None);
        }
    }
}

/// Pure form of the transition: `(state, command) -> state'`
pub fn reduce(
    state: &EditorState,
    command: Command,
    ids: &mut dyn IdSource,
) -> Result<EditorState, MutationError> {
    let mut next = state.clone();
    next.apply(command, ids)?;
    Ok(next)
}
