//! # Commands
//!
//! The closed set of requests the Mutation Engine accepts. Commands are
//! plain data: they serialize as `{ "type": "ADD_ELEMENT", "payload": {..} }`
//! so a browser UI can send them over the same JSON channel it uses for
//! documents.
//!
//! ## Semantics
//!
//! ### AddElement / InsertElement
//! - The template's ids are ignored; every node gets a fresh id
//! - Any kind may be nested in any container
//!
//! ### UpdateElement
//! - Styles merge key by key, the leaf payload is replaced wholesale
//!
//! ### DeleteElement
//! - Removes the node and all descendants
//! - Clears the selection if it pointed into the removed subtree
//!
//! ### MoveElement
//! - Fails if the target is inside the moved subtree

use crate::view::Device;
use pagesmith_model::{DocumentSnapshot, Element, ElementPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Replace the whole document, clear selection, set live mode
    #[serde(alias = "LOAD_DATA", rename_all = "camelCase")]
    LoadDocument {
        elements: DocumentSnapshot,
        #[serde(default)]
        with_live: bool,
    },

    /// Append a copy of `element` (with fresh ids) to a container
    #[serde(rename_all = "camelCase")]
    AddElement {
        container_id: String,
        #[serde(alias = "elementDetails")]
        element: Element,
    },

    /// Like AddElement, at a given child index
    #[serde(rename_all = "camelCase")]
    InsertElement {
        container_id: String,
        index: usize,
        element: Element,
    },

    /// Shallow-merge fields onto an element
    UpdateElement { id: String, patch: ElementPatch },

    /// Remove an element and its subtree
    DeleteElement { id: String },

    /// Relocate an element under a new parent, appending when `index` is absent
    #[serde(rename_all = "camelCase")]
    MoveElement {
        id: String,
        new_parent_id: String,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Focus an element, or clear the selection
    #[serde(alias = "CHANGE_CLICKED_ELEMENT")]
    SelectElement {
        #[serde(default)]
        id: Option<String>,
    },

    TogglePreviewMode,

    ToggleLiveMode,

    SetPreviewMode { value: bool },

    SetLiveMode { value: bool },

    ChangeDevice { device: Device },
}

impl Command {
    pub fn load(snapshot: DocumentSnapshot) -> Self {
        Command::LoadDocument {
            elements: snapshot,
            with_live: false,
        }
    }

    pub fn add(container_id: impl Into<String>, element: Element) -> Self {
        Command::AddElement {
            container_id: container_id.into(),
            element,
        }
    }

    pub fn update(id: impl Into<String>, patch: ElementPatch) -> Self {
        Command::UpdateElement {
            id: id.into(),
            patch,
        }
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Command::DeleteElement { id: id.into() }
    }

    pub fn select(id: impl Into<String>) -> Self {
        Command::SelectElement {
            id: Some(id.into()),
        }
    }

    pub fn deselect() -> Self {
        Command::SelectElement { id: None }
    }

    /// Edits the user makes by manipulating the tree directly. These are the
    /// commands gated off in preview and live mode.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Command::AddElement { .. }
                | Command::InsertElement { .. }
                | Command::UpdateElement { .. }
                | Command::DeleteElement { .. }
                | Command::MoveElement { .. }
        )
    }

    pub fn changes_tree(&self) -> bool {
        self.is_structural() || matches!(self, Command::LoadDocument { .. })
    }

    /// Get a debug name for this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadDocument { .. } => "LoadDocument",
            Command::AddElement { .. } => "AddElement",
            Command::InsertElement { .. } => "InsertElement",
            Command::UpdateElement { .. } => "UpdateElement",
            Command::DeleteElement { .. } => "DeleteElement",
            Command::MoveElement { .. } => "MoveElement",
            Command::SelectElement { .. } => "SelectElement",
            Command::TogglePreviewMode => "TogglePreviewMode",
            Command::ToggleLiveMode => "ToggleLiveMode",
            Command::SetPreviewMode { .. } => "SetPreviewMode",
            Command::SetLiveMode { .. } => "SetLiveMode",
            Command::ChangeDevice { .. } => "ChangeDevice",
        }
    }
}
