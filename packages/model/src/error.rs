use crate::element::ElementKind;
use thiserror::Error;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Failures at the load boundary, before a document reaches the editor
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown element type: {0}")]
    UnknownKind(String),

    #[error("Element {id} of type {kind} must have {expected} content")]
    ContentMismatch {
        id: String,
        kind: ElementKind,
        expected: &'static str,
    },

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Page root may only appear at the top of the document (found {0})")]
    NestedRoot(String),
}

impl SnapshotError {
    pub fn content_mismatch(id: impl Into<String>, kind: ElementKind) -> Self {
        let expected = if kind.is_container() {
            "child element"
        } else {
            "leaf payload"
        };

        Self::ContentMismatch {
            id: id.into(),
            kind,
            expected,
        }
    }
}
