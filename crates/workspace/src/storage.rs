//! Storage collaborator interface.
//!
//! The engine reads the four collections once at startup and writes a
//! collection back after each mutation that touched it. Implementations
//! must treat a missing backing store as empty defaults rather than an
//! error.

use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use crate::model::{Folder, Note, Settings, TrashItem};

/// Errors raised by [`Storage`] implementations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Reading or writing a backing file failed.
	#[error("storage I/O error at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	/// A backing file holds malformed JSON.
	#[error("malformed JSON in {path}: {source}")]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
	/// The backend refused the request.
	#[error("storage unavailable: {0}")]
	Unavailable(String),
}

impl StorageError {
	/// Stored data exists but could not be parsed.
	pub fn is_malformed(&self) -> bool {
		matches!(self, StorageError::Json { .. })
	}
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Which collection a storage call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
	Notes,
	Folders,
	Trash,
	Settings,
}

impl Collection {
	pub const ALL: [Collection; 4] = [Collection::Notes, Collection::Folders, Collection::Trash, Collection::Settings];

	pub const fn as_str(self) -> &'static str {
		match self {
			Collection::Notes => "notes",
			Collection::Folders => "folders",
			Collection::Trash => "trash",
			Collection::Settings => "settings",
		}
	}
}

/// Async persistence for notes, folders, trash and settings.
#[async_trait]
pub trait Storage: Send + Sync {
	async fn load_notes(&self) -> Result<Vec<Note>>;
	async fn save_notes(&self, notes: Vec<Note>) -> Result<()>;
	async fn load_folders(&self) -> Result<Vec<Folder>>;
	async fn save_folders(&self, folders: Vec<Folder>) -> Result<()>;
	async fn load_trash(&self) -> Result<Vec<TrashItem>>;
	async fn save_trash(&self, trash: Vec<TrashItem>) -> Result<()>;
	async fn load_settings(&self) -> Result<Settings>;
	async fn save_settings(&self, settings: Settings) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
struct MemoryState {
	notes: Vec<Note>,
	folders: Vec<Folder>,
	trash: Vec<TrashItem>,
	settings: Settings,
	writes: usize,
}

/// In-process [`Storage`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	state: Mutex<MemoryState>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds the store as if a previous session had saved these notes.
	pub fn with_notes(self, notes: Vec<Note>) -> Self {
		self.state.lock().notes = notes;
		self
	}

	pub fn with_folders(self, folders: Vec<Folder>) -> Self {
		self.state.lock().folders = folders;
		self
	}

	pub fn with_settings(self, settings: Settings) -> Self {
		self.state.lock().settings = settings;
		self
	}

	pub fn notes(&self) -> Vec<Note> {
		self.state.lock().notes.clone()
	}

	pub fn folders(&self) -> Vec<Folder> {
		self.state.lock().folders.clone()
	}

	pub fn trash(&self) -> Vec<TrashItem> {
		self.state.lock().trash.clone()
	}

	pub fn settings(&self) -> Settings {
		self.state.lock().settings.clone()
	}

	/// Number of save calls served so far.
	pub fn writes(&self) -> usize {
		self.state.lock().writes
	}
}

#[async_trait]
impl Storage for MemoryStorage {
	async fn load_notes(&self) -> Result<Vec<Note>> {
		Ok(self.notes())
	}

	async fn save_notes(&self, notes: Vec<Note>) -> Result<()> {
		let mut state = self.state.lock();
		state.notes = notes;
		state.writes += 1;
		Ok(())
	}

	async fn load_folders(&self) -> Result<Vec<Folder>> {
		Ok(self.folders())
	}

	async fn save_folders(&self, folders: Vec<Folder>) -> Result<()> {
		let mut state = self.state.lock();
		state.folders = folders;
		state.writes += 1;
		Ok(())
	}

	async fn load_trash(&self) -> Result<Vec<TrashItem>> {
		Ok(self.trash())
	}

	async fn save_trash(&self, trash: Vec<TrashItem>) -> Result<()> {
		let mut state = self.state.lock();
		state.trash = trash;
		state.writes += 1;
		Ok(())
	}

	async fn load_settings(&self) -> Result<Settings> {
		Ok(self.settings())
	}

	async fn save_settings(&self, settings: Settings) -> Result<()> {
		let mut state = self.state.lock();
		state.settings = settings;
		state.writes += 1;
		Ok(())
	}
}
