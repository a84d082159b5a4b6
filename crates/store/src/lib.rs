#![cfg_attr(test, allow(unused_crate_dependencies))]
//! JSON file storage for the notepane workspace.
//!
//! [`JsonStore`] keeps one file per collection in a data directory:
//!
//! ```text
//! <data_dir>/
//! ├── notes.json      // [Note]
//! ├── folders.json    // [Folder]
//! ├── trash.json      // [TrashItem]
//! └── settings.json   // Settings, including sessionState
//! ```
//!
//! A missing file reads as the collection's empty default. Each write goes
//! to its own hidden sibling temp file that is then renamed over the target,
//! so a crash mid-write leaves the previous contents intact.

mod files;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use notepane_workspace::storage::{Collection, Result, Storage};
use notepane_workspace::{Folder, Note, Settings, TrashItem};
use tracing::debug;

/// [`Storage`] over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonStore {
	root: PathBuf,
}

impl JsonStore {
	/// Creates a store rooted at `root`. The directory is created lazily on
	/// the first write.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		let root = root.into();
		debug!(root = %root.display(), "json store opened");
		Self { root }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Backing file of `collection`.
	pub fn path(&self, collection: Collection) -> PathBuf {
		self.root.join(format!("{}.json", collection.as_str()))
	}
}

#[async_trait]
impl Storage for JsonStore {
	async fn load_notes(&self) -> Result<Vec<Note>> {
		files::read_or_default(&self.path(Collection::Notes)).await
	}

	async fn save_notes(&self, notes: Vec<Note>) -> Result<()> {
		files::write_atomic(&self.path(Collection::Notes), &notes).await
	}

	async fn load_folders(&self) -> Result<Vec<Folder>> {
		files::read_or_default(&self.path(Collection::Folders)).await
	}

	async fn save_folders(&self, folders: Vec<Folder>) -> Result<()> {
		files::write_atomic(&self.path(Collection::Folders), &folders).await
	}

	async fn load_trash(&self) -> Result<Vec<TrashItem>> {
		files::read_or_default(&self.path(Collection::Trash)).await
	}

	async fn save_trash(&self, trash: Vec<TrashItem>) -> Result<()> {
		files::write_atomic(&self.path(Collection::Trash), &trash).await
	}

	async fn load_settings(&self) -> Result<Settings> {
		files::read_or_default(&self.path(Collection::Settings)).await
	}

	async fn save_settings(&self, settings: Settings) -> Result<()> {
		files::write_atomic(&self.path(Collection::Settings), &settings).await
	}
}
