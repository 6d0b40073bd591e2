//! Error types for the editor

use pagesmith_model::{ElementKind, SnapshotError};
use thiserror::Error;

/// Validation failure of a single command. The state is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Element {0} is not a container")]
    NotAContainer(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("The page root cannot be created, moved, or deleted")]
    RootImmutable,

    #[error("Element {id} of type {kind} has no leaf content to update")]
    ContentMismatch { id: String, kind: ElementKind },

    #[error("Would create cycle")]
    CycleDetected,
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document is read-only in preview or live mode")]
    ReadOnly,
}
