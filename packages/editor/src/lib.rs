//! # Pagesmith Editor
//!
//! Document engine for the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: elements, snapshots, id sources      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: tree store + mutation engine        │
//! │  - Validate-then-apply commands             │
//! │  - View state (selection, device, modes)    │
//! │  - Undo/redo over tree snapshots            │
//! │  - Snapshot load/save adapters              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ presentation: DispatchTable, Affordances    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is the document**: everything a UI shows derives from it
//! 2. **All or nothing**: a failed command leaves the state untouched
//! 3. **Ids are the engine's job**: templates never decide their own ids
//! 4. **One root**: the page root cannot be created, moved, or deleted
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagesmith_editor::{palette, Command, Editor};
//! use pagesmith_model::{ElementKind, ROOT_ID};
//!
//! let mut editor = Editor::new();
//! editor.load_document(snapshot)?;
//!
//! let heading = palette::template(ElementKind::Heading).unwrap();
//! let result = editor.dispatch(Command::add(ROOT_ID, heading))?;
//!
//! editor.dispatch(Command::select(result.created_id.unwrap()))?;
//! editor.undo();
//!
//! store.save(&editor.snapshot()?)?;
//! ```

mod commands;
mod config;
mod dispatch;
mod errors;
mod history;
pub mod palette;
mod persistence;
mod session;
mod state;
mod tree;
mod view;

pub use commands::Command;
pub use config::{EditorConfig, IdStrategy};
pub use dispatch::{DispatchTable, ElementHandler, RenderContext};
pub use errors::{EditorError, MutationError};
pub use history::{Checkpoint, History};
pub use persistence::{FileStore, MemoryStore, SnapshotStore};
pub use session::{Editor, MutationResult};
pub use state::{reduce, EditorState, Transition};
pub use tree::{ElementTree, NodePath, Position};
pub use view::{Affordances, Device, ViewState};

// Re-export model types for convenience
pub use pagesmith_model::{DocumentSnapshot, Element, ElementKind, ElementPatch, ROOT_ID};
