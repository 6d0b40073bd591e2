//! # Snapshot Storage
//!
//! Adapters between the editor and wherever documents live. The engine
//! itself never does I/O; it hands out [`DocumentSnapshot`]s and takes them
//! back on load.

use crate::errors::EditorError;
use pagesmith_common::filesystem::{FileSystem, RealFileSystem};
use pagesmith_model::DocumentSnapshot;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Somewhere a document snapshot can be read from and written to.
///
/// Stores do not merge. Concurrent saves from several sessions overwrite each
/// other and the last writer wins.
pub trait SnapshotStore {
    fn load(&self) -> Result<DocumentSnapshot, EditorError>;

    fn save(&mut self, snapshot: &DocumentSnapshot) -> Result<(), EditorError>;
}

/// Keeps the last saved snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<DocumentSnapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: DocumentSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// Number of saves since creation
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<DocumentSnapshot, EditorError> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, snapshot: &DocumentSnapshot) -> Result<(), EditorError> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

/// JSON document on disk. A missing file loads as an empty page.
#[derive(Debug)]
pub struct FileStore<F: FileSystem = RealFileSystem> {
    path: PathBuf,
    fs: F,
    pretty: bool,
}

impl FileStore<RealFileSystem> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, RealFileSystem)
    }
}

impl<F: FileSystem> FileStore<F> {
    pub fn with_fs(path: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            path: path.into(),
            fs,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }
}

impl<F: FileSystem> SnapshotStore for FileStore<F> {
    fn load(&self) -> Result<DocumentSnapshot, EditorError> {
        if !self.fs.exists(&self.path) {
            debug!(path = %self.path.display(), "No document on disk, starting empty");
            return Ok(DocumentSnapshot::empty());
        }

        let source = self.fs.read_to_string(&self.path)?;
        Ok(DocumentSnapshot::from_json(&source)?)
    }

    fn save(&mut self, snapshot: &DocumentSnapshot) -> Result<(), EditorError> {
        let mut json = snapshot.to_json(self.pretty)?;
        json.push('\n');
        self.fs.write(&self.path, &json)?;
        debug!(path = %self.path.display(), nodes = snapshot.node_count(), "Saved document");
        Ok(())
    }
}
