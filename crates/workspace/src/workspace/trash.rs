use chrono::Utc;
use notepane_primitives::{DocumentId, FolderId};
use tracing::{debug, info};

use super::Workspace;
use crate::model::{TrashItem, Trashed};
use crate::persist::Dirty;

impl Workspace {
	/// Moves a note to the trash, closing its tabs and window.
	pub fn trash_note(&mut self, id: &DocumentId) -> bool {
		let Some(idx) = self.notes.iter().position(|note| &note.id == id) else {
			return false;
		};
		let note = self.notes.remove(idx);
		self.trash.push(TrashItem {
			deleted_at: Utc::now(),
			item: Trashed::Note(note),
		});
		self.forget_views(id);
		self.mark(Dirty::NOTES | Dirty::TRASH);
		debug!(doc = %id, "note trashed");
		true
	}

	/// Moves a folder to the trash together with the notes directly inside
	/// it and a copy of its subfolder tree. Direct child folders stay in the
	/// sidebar, re-parented to the root.
	pub fn trash_folder(&mut self, id: &FolderId) -> bool {
		let Some(idx) = self.folders.iter().position(|folder| &folder.id == id) else {
			return false;
		};
		let subfolders = self.descendants(id);
		let (inside, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.notes).into_iter().partition(|note| note.folder_id.as_ref() == Some(id));
		self.notes = kept;
		for note in &inside {
			self.forget_views(&note.id);
		}

		let folder = self.folders.remove(idx);
		for child in self.folders.iter_mut().filter(|folder| folder.parent_id.as_ref() == Some(id)) {
			child.parent_id = None;
		}
		debug!(folder = %id, notes = inside.len(), subfolders = subfolders.len(), "folder trashed");
		self.trash.push(TrashItem {
			deleted_at: Utc::now(),
			item: Trashed::Folder {
				folder,
				notes: inside,
				subfolders,
			},
		});
		self.settings.folders_open.retain(|key| key != id.as_str());
		self.mark(Dirty::NOTES | Dirty::FOLDERS | Dirty::TRASH | Dirty::SETTINGS);
		true
	}

	/// Puts a trashed item back. Notes whose id is live again are skipped,
	/// as are folders that already exist.
	pub fn restore_from_trash(&mut self, id: &str) -> bool {
		let Some(idx) = self.trash.iter().position(|item| item.id() == id) else {
			return false;
		};
		let item = self.trash.remove(idx);
		match item.item {
			Trashed::Note(note) => {
				self.restore_note(note);
				self.mark(Dirty::NOTES);
			}
			Trashed::Folder { folder, notes, subfolders } => {
				for folder in std::iter::once(folder).chain(subfolders) {
					if self.folder(&folder.id).is_none() {
						self.folders.push(folder);
					}
				}
				for note in notes {
					self.restore_note(note);
				}
				self.mark(Dirty::NOTES | Dirty::FOLDERS);
			}
		}
		self.mark(Dirty::TRASH);
		debug!(id, "restored from trash");
		true
	}

	fn restore_note(&mut self, note: crate::model::Note) {
		if self.has_note(&note.id) {
			return;
		}
		self.notes.push(note);
	}

	/// Deletes one trashed item for good.
	pub fn purge_from_trash(&mut self, id: &str) -> bool {
		let before = self.trash.len();
		self.trash.retain(|item| item.id() != id);
		if self.trash.len() == before {
			return false;
		}
		self.mark(Dirty::TRASH);
		true
	}

	/// Deletes everything in the trash. Returns how many items went.
	pub fn empty_trash(&mut self) -> usize {
		let purged = self.trash.len();
		if purged > 0 {
			self.trash.clear();
			self.mark(Dirty::TRASH);
			info!(purged, "trash emptied");
		}
		purged
	}
}
