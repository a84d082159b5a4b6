//! Persistence outbox.
//!
//! Mutations only mark collections dirty. The host drains the outbox after
//! each transition with [`crate::Workspace::take_persist_jobs`], which
//! snapshots every dirty collection into an owned [`PersistJob`]. Jobs are
//! either awaited with [`run_jobs`] or handed to a [`PersistQueue`]; either
//! way a failed write is logged and never rolls back memory state. Batches
//! run one at a time in submission order, so a later job for a collection
//! always overwrites the earlier one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::model::{Folder, Note, Settings, TrashItem};
use crate::storage::{Collection, Storage, StorageError};

bitflags::bitflags! {
	/// Collections with unsaved changes.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Dirty: u8 {
		const NOTES = 1 << 0;
		const FOLDERS = 1 << 1;
		const TRASH = 1 << 2;
		/// Settings blob, including the session snapshot.
		const SETTINGS = 1 << 3;
	}
}

impl From<Collection> for Dirty {
	fn from(collection: Collection) -> Self {
		match collection {
			Collection::Notes => Dirty::NOTES,
			Collection::Folders => Dirty::FOLDERS,
			Collection::Trash => Dirty::TRASH,
			Collection::Settings => Dirty::SETTINGS,
		}
	}
}

/// Owned payload for one collection write.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistJob {
	Notes(Vec<Note>),
	Folders(Vec<Folder>),
	Trash(Vec<TrashItem>),
	Settings(Settings),
}

impl PersistJob {
	pub fn collection(&self) -> Collection {
		match self {
			PersistJob::Notes(_) => Collection::Notes,
			PersistJob::Folders(_) => Collection::Folders,
			PersistJob::Trash(_) => Collection::Trash,
			PersistJob::Settings(_) => Collection::Settings,
		}
	}

	async fn run(self, storage: &dyn Storage) -> Result<(), StorageError> {
		match self {
			PersistJob::Notes(notes) => storage.save_notes(notes).await,
			PersistJob::Folders(folders) => storage.save_folders(folders).await,
			PersistJob::Trash(trash) => storage.save_trash(trash).await,
			PersistJob::Settings(settings) => storage.save_settings(settings).await,
		}
	}
}

/// Runs `jobs` in order, logging each failure. Returns the number of
/// failed writes.
pub async fn run_jobs(storage: &dyn Storage, jobs: Vec<PersistJob>) -> usize {
	let mut failed = 0;
	for job in jobs {
		let collection = job.collection();
		match job.run(storage).await {
			Ok(()) => debug!(collection = collection.as_str(), "persisted"),
			Err(error) => {
				failed += 1;
				warn!(collection = collection.as_str(), %error, "persist failed; keeping in-memory state");
			}
		}
	}
	failed
}

/// Fire-and-forget writer: one tokio task that runs submitted batches in
/// order.
#[derive(Debug)]
pub struct PersistQueue {
	tx: mpsc::UnboundedSender<Vec<PersistJob>>,
	worker: JoinHandle<usize>,
}

impl PersistQueue {
	/// Starts the writer task on the current tokio runtime.
	pub fn spawn(storage: Arc<dyn Storage>) -> Self {
		let (tx, mut rx) = mpsc::unbounded_channel::<Vec<PersistJob>>();
		let worker = tokio::spawn(async move {
			let mut failed = 0;
			while let Some(jobs) = rx.recv().await {
				failed += run_jobs(storage.as_ref(), jobs).await;
			}
			debug!(failed, "persist writer drained");
			failed
		});
		Self { tx, worker }
	}

	/// Queues `jobs` without waiting. Returns `false` for an empty batch or
	/// a writer that has stopped.
	pub fn submit(&self, jobs: Vec<PersistJob>) -> bool {
		if jobs.is_empty() {
			return false;
		}
		let count = jobs.len();
		match self.tx.send(jobs) {
			Ok(()) => {
				trace!(jobs = count, "persist batch queued");
				true
			}
			Err(_) => {
				warn!(jobs = count, "persist writer stopped; batch dropped");
				false
			}
		}
	}

	/// Closes the queue, waits for queued batches and returns the number of
	/// failed writes.
	pub async fn finish(self) -> usize {
		let Self { tx, worker } = self;
		drop(tx);
		match worker.await {
			Ok(failed) => failed,
			Err(error) => {
				warn!(%error, "persist writer aborted");
				0
			}
		}
	}
}
