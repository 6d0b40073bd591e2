//! # Pagesmith Model
//!
//! Data model for page documents: element kinds, element nodes, leaf
//! payloads, style values, identifier generation, and the validated
//! [`DocumentSnapshot`] exchanged with storage.

pub mod element;
pub mod error;
pub mod id_generator;
pub mod snapshot;

pub use element::{
    Content, Element, ElementKind, ElementPatch, LeafContent, RawElement, StyleValue, Styles,
    ROOT_ID,
};
pub use error::{SnapshotError, SnapshotResult};
pub use id_generator::{get_document_seed, IdSource, SequentialIds, UuidIds};
pub use snapshot::DocumentSnapshot;
