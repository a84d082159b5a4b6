//! The application state struct.
//!
//! [`Workspace`] owns every collection and component. All mutation goes
//! through its methods, which are split by concern:
//!
//! - `tabs` - pane and split operations
//! - `notes` - note and folder CRUD
//! - `trash` - trash bin
//! - `transfer` - duplicate, JSON export and import
//! - `editing` - history capture, undo/redo
//! - `windows` - floating windows
//!
//! Methods never fail: invalid ids are no-ops reported through `bool` or
//! outcome enums. Persistence goes through the outbox in [`crate::persist`].

mod editing;
mod notes;
mod tabs;
mod transfer;
mod trash;
mod windows;

use std::collections::HashMap;
use std::time::Duration;

use notepane_config::{Config, WindowPolicy};
use notepane_primitives::{DocumentId, Origin};
use tracing::{debug, info, warn};

pub use editing::{EditOutcome, HistoryOutcome};
pub use notes::UNCATEGORIZED_KEY;
pub use transfer::{ImportError, ImportSummary, import_folder_name};

use crate::history::coalesce::{Coalescer, DeferredCommits};
use crate::history::{DEFAULT_CAPACITY, HistoryStore};
use crate::layout::{LayoutController, LayoutObserver, ObserverId, Transition};
use crate::model::{Folder, Note, Settings, TrashItem};
use crate::persist::{Dirty, PersistJob};
use crate::session::SessionSnapshot;
use crate::storage::{Collection, Storage};
use crate::window::WindowRegistry;

/// Behavior knobs, usually derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceOptions {
	pub history_capacity: usize,
	pub idle_commit: Duration,
	pub window_policy: WindowPolicy,
	/// Default for sidebar opens when settings do not say otherwise.
	pub auto_split: bool,
}

impl Default for WorkspaceOptions {
	fn default() -> Self {
		Self {
			history_capacity: DEFAULT_CAPACITY,
			idle_commit: Duration::from_millis(1500),
			window_policy: WindowPolicy::Single,
			auto_split: true,
		}
	}
}

impl From<&Config> for WorkspaceOptions {
	fn from(config: &Config) -> Self {
		Self {
			history_capacity: config.history.capacity,
			idle_commit: config.history.idle_commit(),
			window_policy: config.windows.policy,
			auto_split: config.layout.auto_split,
		}
	}
}

/// Notes, folders, trash, settings and the view state over them.
#[derive(Debug)]
pub struct Workspace {
	options: WorkspaceOptions,
	history: HistoryStore,
	notes: Vec<Note>,
	folders: Vec<Folder>,
	trash: Vec<TrashItem>,
	settings: Settings,
	layout: LayoutController,
	windows: WindowRegistry,
	coalescers: HashMap<DocumentId, Coalescer>,
	deferred: DeferredCommits,
	dirty: Dirty,
	/// Collections whose stored data could not be parsed. They are never
	/// written back, so the unreadable file stays intact.
	unreadable: Dirty,
}

impl Default for Workspace {
	fn default() -> Self {
		Self::new(WorkspaceOptions::default())
	}
}

impl Workspace {
	/// Creates an empty workspace.
	pub fn new(options: WorkspaceOptions) -> Self {
		Self {
			history: HistoryStore::new(options.history_capacity),
			notes: Vec::new(),
			folders: Vec::new(),
			trash: Vec::new(),
			settings: Settings::default(),
			layout: LayoutController::new(),
			windows: WindowRegistry::new(options.window_policy),
			coalescers: HashMap::new(),
			deferred: DeferredCommits::new(options.idle_commit),
			dirty: Dirty::empty(),
			unreadable: Dirty::empty(),
			options,
		}
	}

	/// Loads every collection from `storage` and replays the saved session.
	///
	/// Each failed read is logged and replaced by its empty default. A
	/// collection that exists but fails to parse is also marked unreadable
	/// and is not written back. Nothing is marked dirty by hydration.
	pub async fn hydrate(options: WorkspaceOptions, storage: &dyn Storage) -> Self {
		let mut workspace = Self::new(options);
		workspace.notes = workspace.loaded(Collection::Notes, storage.load_notes().await);
		workspace.folders = workspace.loaded(Collection::Folders, storage.load_folders().await);
		workspace.trash = workspace.loaded(Collection::Trash, storage.load_trash().await);
		workspace.settings = workspace.loaded(Collection::Settings, storage.load_settings().await);

		let capacity = workspace.history.capacity();
		for note in &mut workspace.notes {
			note.history.normalize(capacity);
		}
		if workspace.settings.auto_split_mode.is_none() {
			workspace.settings.auto_split_mode = Some(workspace.options.auto_split);
		}
		if let Some(session) = workspace.settings.session_state.clone() {
			let pinned = workspace.settings.pinned_tabs.clone();
			let Workspace { layout, windows, notes, .. } = &mut workspace;
			session.restore(layout, windows, &pinned, |id| notes.iter().any(|note| &note.id == id));
		}

		info!(
			notes = workspace.notes.len(),
			folders = workspace.folders.len(),
			trash = workspace.trash.len(),
			"workspace hydrated"
		);
		workspace
	}

	pub fn options(&self) -> &WorkspaceOptions {
		&self.options
	}

	pub fn notes(&self) -> &[Note] {
		&self.notes
	}

	pub fn note(&self, id: &DocumentId) -> Option<&Note> {
		self.notes.iter().find(|note| &note.id == id)
	}

	pub(crate) fn note_mut(&mut self, id: &DocumentId) -> Option<&mut Note> {
		self.notes.iter_mut().find(|note| &note.id == id)
	}

	pub fn has_note(&self, id: &DocumentId) -> bool {
		self.note(id).is_some()
	}

	pub fn folders(&self) -> &[Folder] {
		&self.folders
	}

	pub fn trash(&self) -> &[TrashItem] {
		&self.trash
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn layout(&self) -> &LayoutController {
		&self.layout
	}

	pub fn windows(&self) -> &WindowRegistry {
		&self.windows
	}

	pub fn history_store(&self) -> &HistoryStore {
		&self.history
	}

	/// Whether sidebar opens may go to the right pane.
	pub fn auto_split(&self) -> bool {
		self.settings.auto_split_mode.unwrap_or(self.options.auto_split)
	}

	pub fn set_auto_split(&mut self, on: bool) {
		if self.settings.auto_split_mode != Some(on) {
			self.settings.auto_split_mode = Some(on);
			self.mark(Dirty::SETTINGS);
		}
	}

	/// Registers a layout observer. Observers see every transition,
	/// including replayed ones tagged [`Origin::Replay`].
	pub fn subscribe_layout(&mut self, observer: impl LayoutObserver + 'static) -> ObserverId {
		self.layout.subscribe(observer)
	}

	pub fn unsubscribe_layout(&mut self, id: ObserverId) -> bool {
		self.layout.unsubscribe(id)
	}

	/// Current session snapshot, as it would be persisted.
	pub fn session(&self) -> SessionSnapshot {
		SessionSnapshot::capture(&self.layout, &self.windows)
	}

	pub fn dirty(&self) -> Dirty {
		self.dirty
	}

	/// Collections that failed to parse at hydration and stay read-only.
	pub fn unreadable(&self) -> Dirty {
		self.unreadable
	}

	fn loaded<T: Default>(&mut self, collection: Collection, loaded: crate::storage::Result<T>) -> T {
		loaded.unwrap_or_else(|error| {
			if error.is_malformed() {
				self.unreadable |= Dirty::from(collection);
				warn!(collection = collection.as_str(), %error, "stored data unreadable; collection is read-only this session");
			} else {
				warn!(collection = collection.as_str(), %error, "load failed; using empty default");
			}
			T::default()
		})
	}

	pub(crate) fn mark(&mut self, dirty: Dirty) {
		self.dirty |= dirty;
	}

	/// Records a layout transition: session changes are persisted unless
	/// they were replayed.
	pub(crate) fn settle_layout(&mut self, transition: &Transition, origin: Origin) -> bool {
		if transition.is_empty() {
			return false;
		}
		if !origin.is_replay() {
			self.mark(Dirty::SETTINGS);
		}
		true
	}

	/// Drains the outbox into owned payloads, one per dirty collection.
	pub fn take_persist_jobs(&mut self) -> Vec<PersistJob> {
		let dirty = std::mem::take(&mut self.dirty);
		let withheld = dirty.intersection(self.unreadable);
		if !withheld.is_empty() {
			warn!(collections = ?withheld, "not overwriting unreadable collections");
		}
		let dirty = dirty.difference(self.unreadable);
		let mut jobs = Vec::new();
		if dirty.contains(Dirty::NOTES) {
			jobs.push(PersistJob::Notes(self.notes.clone()));
		}
		if dirty.contains(Dirty::FOLDERS) {
			jobs.push(PersistJob::Folders(self.folders.clone()));
		}
		if dirty.contains(Dirty::TRASH) {
			jobs.push(PersistJob::Trash(self.trash.clone()));
		}
		if dirty.contains(Dirty::SETTINGS) {
			self.settings.session_state = Some(self.session());
			let mut pinned: Vec<DocumentId> = self.layout.pinned().iter().cloned().collect();
			pinned.sort();
			self.settings.pinned_tabs = pinned;
			jobs.push(PersistJob::Settings(self.settings.clone()));
		}
		if !jobs.is_empty() {
			debug!(jobs = jobs.len(), "persist jobs drained");
		}
		jobs
	}
}
