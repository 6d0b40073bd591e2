pub mod add;
pub mod apply;
pub mod init;
pub mod inspect;
pub mod new;
pub mod validate;

pub use add::{add, AddArgs};
pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use new::{new, NewArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use pagesmith_editor::{FileStore, SnapshotStore};
use pagesmith_model::DocumentSnapshot;
use std::path::Path;

/// Read a document that must already exist
pub(crate) fn read_document(path: &Path) -> Result<DocumentSnapshot> {
    if !path.exists() {
        anyhow::bail!("Document does not exist: {}", path.display());
    }

    FileStore::new(path)
        .load()
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Document name used to seed sequential ids
pub(crate) fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
