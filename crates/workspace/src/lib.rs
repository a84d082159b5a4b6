#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Document state engine for a two-pane note app.
//!
//! # Main Types
//!
//! - [`Workspace`] - owns notes, folders, trash, settings and the view state
//! - [`layout::LayoutController`] - left/right tabs and the split state machine
//! - [`history::HistoryStore`] - per-note undo/redo with a fixed capacity
//! - [`window::WindowRegistry`] - floating note windows
//! - [`storage::Storage`] - async collaborator that loads and saves collections
//!
//! # Architecture
//!
//! ```text
//! Workspace
//! ├── notes / folders / trash / settings   // persisted collections
//! ├── layout: LayoutController             // ViewSlot left + right, split, pins
//! ├── windows: WindowRegistry              // floating windows
//! ├── history: HistoryStore                // capacity policy over Note::history
//! └── dirty: Dirty                         // persistence outbox
//! ```
//!
//! Mutations are synchronous. The host drains [`Workspace::take_persist_jobs`]
//! after each one and hands the jobs to [`persist::run_jobs`] or a
//! [`persist::PersistQueue`].

/// Undo/redo history, caret restore and edit coalescing.
pub mod history;
/// Split layout state machine and its observers.
pub mod layout;
/// Persisted records: notes, folders, trash items, settings.
pub mod model;
/// Dirty tracking and persistence jobs.
pub mod persist;
/// Note search with content excerpts.
pub mod search;
/// Session snapshot capture and replay.
pub mod session;
/// Ordered tab list with an active tab.
pub mod slot;
/// Storage collaborator interface and an in-memory backend.
pub mod storage;
/// Floating window registry.
pub mod window;
mod workspace;

pub use history::coalesce::EditTrigger;
pub use history::{DocHistory, HistoryEntry, HistoryStore};
pub use layout::{LayoutController, LayoutEvent, LayoutObserver, ObserverId, Transition};
pub use model::{Folder, Note, Settings, TrashItem, Trashed};
pub use notepane_primitives::{Cursor, DocumentId, FolderId, Origin, Side};
pub use persist::{Dirty, PersistJob, PersistQueue};
pub use session::SessionSnapshot;
pub use storage::{MemoryStorage, Storage, StorageError};
pub use window::{WindowOpen, WindowRegistry};
pub use workspace::{EditOutcome, HistoryOutcome, ImportError, ImportSummary, UNCATEGORIZED_KEY, Workspace, WorkspaceOptions, import_folder_name};
