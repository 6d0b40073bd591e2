//! # Editing Session
//!
//! [`Editor`] owns one document's [`EditorState`] together with the pieces
//! around the pure transition: the id source, undo history, a version
//! counter, and dirty tracking for the save path.
//!
//! Dirtiness compares the current tree with the last loaded or saved one,
//! so undoing back to the saved document makes the session clean again.
//!
//! Commands are applied one at a time, in arrival order. A rejected command
//! changes nothing, including the version.

use crate::commands::Command;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::history::History;
use crate::persistence::SnapshotStore;
use crate::state::EditorState;
use crate::tree::ElementTree;
use pagesmith_model::{DocumentSnapshot, IdSource, UuidIds};
use tracing::{debug, info, warn};

/// Outcome of a successfully applied command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Session version after the command
    pub version: u64,

    /// Id of the element an Add/Insert created
    pub created_id: Option<String>,
}

#[derive(Debug)]
pub struct Editor {
    state: EditorState,
    history: History,
    ids: Box<dyn IdSource>,

    /// Increments on every tree change (edits, undo, redo, load)
    version: u64,

    /// Tree as of the last load or save
    saved: ElementTree,
}

impl Editor {
    /// Empty document with default settings and random ids
    pub fn new() -> Self {
        Self::with_id_source(Box::new(UuidIds))
    }

    pub fn with_config(config: &EditorConfig, document_name: &str) -> Self {
        Self {
            state: EditorState::with_device(config.default_device),
            history: History::with_max_levels(config.history_limit),
            ids: config.id_source(document_name),
            version: 0,
            saved: ElementTree::new(),
        }
    }

    pub fn with_id_source(ids: Box<dyn IdSource>) -> Self {
        Self {
            state: EditorState::new(),
            history: History::new(),
            ids,
            version: 0,
            saved: ElementTree::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace the document. Resets history and counts as saved.
    pub fn load_document(&mut self, snapshot: DocumentSnapshot) -> Result<u64, EditorError> {
        let result = self.dispatch(Command::load(snapshot))?;
        Ok(result.version)
    }

    /// Apply a command without any mode gating
    pub fn dispatch(&mut self, command: Command) -> Result<MutationResult, EditorError> {
        let name = command.name();
        let is_load = matches!(command, Command::LoadDocument { .. });
        let before = command.is_structural().then(|| self.state.tree().clone());

        let transition = match self.state.apply(command, self.ids.as_mut()) {
            Ok(transition) => transition,
            Err(err) => {
                warn!(command = name, error = %err, "Command rejected");
                return Err(err.into());
            }
        };

        if is_load {
            self.history.clear();
            self.version += 1;
            self.saved = self.state.tree().clone();
            info!(
                version = self.version,
                nodes = self.state.tree().node_count(),
                "Loaded document"
            );
        } else if transition.tree_changed {
            if let Some(before) = before {
                self.history.record(before, Some(name.to_string()));
            }
            self.version += 1;
        }

        debug!(command = name, version = self.version, "Applied command");

        Ok(MutationResult {
            version: self.version,
            created_id: transition.created_id,
        })
    }

    /// Like [`Editor::dispatch`], but refuses structural edits while the
    /// document is shown in preview or live mode
    pub fn guarded_dispatch(&mut self, command: Command) -> Result<MutationResult, EditorError> {
        if command.is_structural() && !self.state.view().is_editing() {
            warn!(command = command.name(), "Edit refused outside edit mode");
            return Err(EditorError::ReadOnly);
        }
        self.dispatch(command)
    }

    /// Independent copy of the current document for saving
    pub fn snapshot(&self) -> Result<DocumentSnapshot, EditorError> {
        Ok(self.state.tree().to_snapshot()?)
    }

    pub fn undo(&mut self) -> bool {
        let Some(tree) = self.history.undo(self.state.tree().clone()) else {
            return false;
        };

        self.state.restore_tree(tree);
        self.version += 1;
        debug!(version = self.version, "Undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(tree) = self.history.redo(self.state.tree().clone()) else {
            return false;
        };

        self.state.restore_tree(tree);
        self.version += 1;
        debug!(version = self.version, "Redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// True if the tree differs from the last loaded or saved one
    pub fn is_dirty(&self) -> bool {
        self.state.tree() != &self.saved
    }

    pub fn mark_saved(&mut self) {
        self.saved = self.state.tree().clone();
    }

    pub fn save_to(&mut self, store: &mut dyn SnapshotStore) -> Result<(), EditorError> {
        let snapshot = self.snapshot()?;
        store.save(&snapshot)?;
        self.mark_saved();
        Ok(())
    }

    pub fn load_from(&mut self, store: &dyn SnapshotStore) -> Result<u64, EditorError> {
        let snapshot = store.load()?;
        self.load_document(snapshot)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;
    use crate::persistence::MemoryStore;
    use pagesmith_model::{ElementKind, ElementPatch, SequentialIds, StyleValue, ROOT_ID};

    fn editor() -> Editor {
        Editor::with_id_source(Box::new(SequentialIds::from_seed("s")))
    }

    fn text() -> pagesmith_model::Element {
        palette::template(ElementKind::Text).unwrap()
    }

    #[test]
    fn test_version_tracks_tree_changes_only() {
        let mut editor = editor();

        let result = editor.dispatch(Command::add(ROOT_ID, text())).unwrap();
        assert_eq!(result.version, 1);
        assert_eq!(result.created_id.as_deref(), Some("s-1"));

        let result = editor.dispatch(Command::ToggleLiveMode).unwrap();
        assert_eq!(result.version, 1);
        assert!(!editor.can_redo());
        assert_eq!(editor.history().undo_levels(), 1);
    }

    #[test]
    fn test_rejected_command_keeps_version() {
        let mut editor = editor();

        let err = editor.dispatch(Command::delete("missing")).unwrap_err();
        assert!(matches!(err, EditorError::Mutation(_)));
        assert_eq!(editor.version(), 0);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_guarded_dispatch_refuses_edits_in_preview() {
        let mut editor = editor();
        editor.dispatch(Command::TogglePreviewMode).unwrap();

        let err = editor.guarded_dispatch(Command::add(ROOT_ID, text())).unwrap_err();
        assert!(matches!(err, EditorError::ReadOnly));

        // view commands still go through
        editor.guarded_dispatch(Command::TogglePreviewMode).unwrap();
        editor.guarded_dispatch(Command::add(ROOT_ID, text())).unwrap();
    }

    #[test]
    fn test_undo_redo() {
        let mut editor = editor();
        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();

        assert!(editor.undo());
        assert!(editor.state().tree().elements().is_empty());
        assert!(!editor.undo());

        assert!(editor.redo());
        assert_eq!(editor.state().tree().elements().len(), 1);
        assert!(!editor.redo());
    }

    #[test]
    fn test_batch_undoes_together() {
        let mut editor = editor();

        editor.begin_batch("Add two");
        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();
        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();
        editor.end_batch();

        assert_eq!(editor.history().undo_description(), Some("Add two"));
        assert!(editor.undo());
        assert!(editor.state().tree().elements().is_empty());
    }

    #[test]
    fn test_dirty_tracking_with_store() {
        let mut editor = editor();
        let mut store = MemoryStore::new();
        assert!(!editor.is_dirty());

        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();
        assert!(editor.is_dirty());

        editor.save_to(&mut store).unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(store.load().unwrap().elements().len(), 1);

        let mut other = Editor::new();
        other.load_from(&store).unwrap();
        assert!(!other.is_dirty());
        assert_eq!(other.state().tree(), editor.state().tree());
    }

    #[test]
    fn test_undo_back_to_saved_state_is_clean() {
        let mut editor = editor();
        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();
        editor.mark_saved();

        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();
        assert!(editor.is_dirty());

        editor.undo();
        assert!(!editor.is_dirty());

        // past the save point is dirty again
        editor.undo();
        assert!(editor.is_dirty());
        editor.redo();
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_root_styles_survive_save_and_reload() {
        let mut editor = editor();
        let legacy = serde_json::json!([
            { "id": "__body", "type": "__body", "styles": { "backgroundColor": "red" }, "content": [] }
        ]);
        editor
            .load_document(DocumentSnapshot::from_value(legacy).unwrap())
            .unwrap();
        assert_eq!(
            editor.state().tree().root().styles.get("backgroundColor"),
            Some(&StyleValue::from("red"))
        );

        editor
            .dispatch(Command::update(ROOT_ID, ElementPatch::new().style("color", "blue")))
            .unwrap();
        let mut store = MemoryStore::new();
        editor.save_to(&mut store).unwrap();

        let mut reloaded = Editor::new();
        reloaded.load_from(&store).unwrap();
        let styles = &reloaded.state().tree().root().styles;
        assert_eq!(styles.get("backgroundColor"), Some(&StyleValue::from("red")));
        assert_eq!(styles.get("color"), Some(&StyleValue::from("blue")));
    }

    #[test]
    fn test_load_resets_history() {
        let mut editor = editor();
        editor.dispatch(Command::add(ROOT_ID, text())).unwrap();

        editor.load_document(DocumentSnapshot::empty()).unwrap();

        assert!(!editor.can_undo());
        assert!(!editor.is_dirty());
    }
}
