use chrono::{Local, Utc};
use notepane_primitives::{DocumentId, FolderId, Side};
use tracing::{debug, trace};
use uuid::Uuid;

use super::Workspace;
use crate::model::{Folder, Note, default_title};
use crate::persist::Dirty;

/// Sidebar key of the uncategorized group in the open-folders set.
pub const UNCATEGORIZED_KEY: &str = "";

impl Workspace {
	/// Creates a note at the top of the list and opens it in the left pane.
	///
	/// A blank title falls back to the current weekday and date.
	pub fn create_note(&mut self, title: Option<&str>) -> DocumentId {
		let title = match title.map(str::trim) {
			Some(title) if !title.is_empty() => title.to_owned(),
			_ => default_title(Local::now()),
		};
		let id = DocumentId::new(Uuid::new_v4().to_string());
		self.notes.insert(0, Note::new(id.clone(), title, Utc::now()));
		self.mark(Dirty::NOTES);
		debug!(doc = %id, "note created");
		self.open_in(Side::Left, &id);
		id
	}

	pub fn rename_note(&mut self, id: &DocumentId, title: &str) -> bool {
		let Some(note) = self.note_mut(id) else {
			return false;
		};
		title.clone_into(&mut note.title);
		note.touch();
		self.mark(Dirty::NOTES);
		true
	}

	/// Replaces the tag list, dropping blanks and duplicates.
	pub fn set_tags(&mut self, id: &DocumentId, tags: impl IntoIterator<Item = String>) -> bool {
		let Some(note) = self.note_mut(id) else {
			return false;
		};
		let mut clean: Vec<String> = Vec::new();
		for tag in tags {
			let tag = tag.trim().to_owned();
			if !tag.is_empty() && !clean.contains(&tag) {
				clean.push(tag);
			}
		}
		note.tags = clean;
		note.touch();
		self.mark(Dirty::NOTES);
		true
	}

	pub fn set_locked(&mut self, id: &DocumentId, locked: bool) -> bool {
		let Some(note) = self.note_mut(id) else {
			return false;
		};
		if note.locked == locked {
			return false;
		}
		note.locked = locked;
		self.mark(Dirty::NOTES);
		true
	}

	/// Moves a note into `folder`, or to the uncategorized group for `None`.
	pub fn move_note_to_folder(&mut self, id: &DocumentId, folder: Option<&FolderId>) -> bool {
		if let Some(folder) = folder
			&& self.folder(folder).is_none()
		{
			return false;
		}
		let Some(note) = self.note_mut(id) else {
			return false;
		};
		note.folder_id = folder.cloned();
		note.touch();
		self.mark(Dirty::NOTES);
		true
	}

	/// Moves `drag` next to `target` in the note list and adopts the
	/// target's folder.
	pub fn reorder_note(&mut self, drag: &DocumentId, target: &DocumentId, before: bool) -> bool {
		if drag == target {
			return false;
		}
		let Some(from) = self.notes.iter().position(|note| &note.id == drag) else {
			return false;
		};
		if !self.has_note(target) {
			return false;
		}
		let mut moved = self.notes.remove(from);
		let Some(target_idx) = self.notes.iter().position(|note| &note.id == target) else {
			self.notes.insert(from, moved);
			return false;
		};
		let at = if before { target_idx } else { target_idx + 1 };
		moved.folder_id = self.notes[target_idx].folder_id.clone();
		moved.touch();
		self.notes.insert(at, moved);
		self.mark(Dirty::NOTES);
		trace!(doc = %drag, target = %target, before, "note reordered");
		true
	}

	pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
		self.folders.iter().find(|folder| &folder.id == id)
	}

	/// Creates a folder under `parent` (root for `None`) and expands the
	/// parent. Returns `None` for a blank name or unknown parent.
	pub fn create_folder(&mut self, name: &str, parent: Option<&FolderId>) -> Option<FolderId> {
		let name = name.trim();
		if name.is_empty() {
			return None;
		}
		if let Some(parent) = parent
			&& self.folder(parent).is_none()
		{
			return None;
		}
		let id = FolderId::new(Uuid::new_v4().to_string());
		self.folders.push(Folder {
			id: id.clone(),
			name: name.to_owned(),
			icon: None,
			parent_id: parent.cloned(),
		});
		self.mark(Dirty::FOLDERS);
		if let Some(parent) = parent {
			self.set_folder_open(parent.as_str(), true);
		}
		debug!(folder = %id, "folder created");
		Some(id)
	}

	pub fn rename_folder(&mut self, id: &FolderId, name: &str) -> bool {
		let name = name.trim();
		if name.is_empty() {
			return false;
		}
		let Some(folder) = self.folders.iter_mut().find(|folder| &folder.id == id) else {
			return false;
		};
		name.clone_into(&mut folder.name);
		self.mark(Dirty::FOLDERS);
		true
	}

	pub fn set_folder_icon(&mut self, id: &FolderId, icon: Option<String>) -> bool {
		let Some(folder) = self.folders.iter_mut().find(|folder| &folder.id == id) else {
			return false;
		};
		folder.icon = icon;
		self.mark(Dirty::FOLDERS);
		true
	}

	/// Flips a folder's expanded state in the sidebar. `key` is a folder id
	/// or [`UNCATEGORIZED_KEY`]. Returns the new state.
	pub fn toggle_folder_open(&mut self, key: &str) -> bool {
		let open = !self.is_folder_open(key);
		self.set_folder_open(key, open);
		open
	}

	pub fn is_folder_open(&self, key: &str) -> bool {
		self.settings.folders_open.iter().any(|open| open == key)
	}

	pub(super) fn set_folder_open(&mut self, key: &str, open: bool) {
		if self.is_folder_open(key) == open {
			return;
		}
		if open {
			self.settings.folders_open.push(key.to_owned());
		} else {
			self.settings.folders_open.retain(|existing| existing != key);
		}
		self.mark(Dirty::SETTINGS);
	}

	/// Display name of a note's folder, if it has one.
	pub fn folder_name(&self, id: &DocumentId) -> Option<&str> {
		let folder_id = self.note(id)?.folder_id.as_ref()?;
		self.folder(folder_id).map(|folder| folder.name.as_str())
	}

	/// Every folder below `root`, depth first.
	pub(crate) fn descendants(&self, root: &FolderId) -> Vec<Folder> {
		let mut out = Vec::new();
		let mut stack = vec![root.clone()];
		while let Some(parent) = stack.pop() {
			for child in self.folders.iter().filter(|folder| folder.parent_id.as_ref() == Some(&parent)) {
				if out.iter().all(|seen: &Folder| seen.id != child.id) && &child.id != root {
					stack.push(child.id.clone());
					out.push(child.clone());
				}
			}
		}
		out
	}

	/// Notes matching `query` in title, tags, folder name or content.
	pub fn search(&self, query: &str) -> Vec<crate::search::SearchHit> {
		crate::search::search(&self.notes, &self.folders, query)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn create_note_goes_first_and_opens_left() {
		let mut ws = Workspace::default();
		let first = ws.create_note(Some("first"));
		let second = ws.create_note(None);
		assert_eq!(ws.notes()[0].id, second);
		assert_eq!(ws.notes()[1].id, first);
		assert!(ws.note(&second).unwrap().title.contains(" - "));
		assert_eq!(ws.layout().slot(Side::Left).active(), Some(&second));
		assert!(ws.dirty().contains(Dirty::NOTES | Dirty::SETTINGS));
	}

	#[test]
	fn reorder_adopts_target_folder() {
		let mut ws = Workspace::default();
		let folder = ws.create_folder("Work", None).unwrap();
		let a = ws.create_note(Some("a"));
		ws.create_note(Some("b"));
		let c = ws.create_note(Some("c"));
		ws.move_note_to_folder(&a, Some(&folder));

		assert!(ws.reorder_note(&c, &a, false));
		let order: Vec<&str> = ws.notes().iter().map(|n| n.title.as_str()).collect();
		assert_eq!(order, vec!["b", "a", "c"]);
		assert_eq!(ws.note(&c).unwrap().folder_id.as_ref(), Some(&folder));
	}

	#[test]
	fn reorder_with_unknown_ids_is_noop() {
		let mut ws = Workspace::default();
		let a = ws.create_note(Some("a"));
		assert!(!ws.reorder_note(&a, &DocumentId::from("ghost"), true));
		assert!(!ws.reorder_note(&a, &a, true));
		assert_eq!(ws.notes().len(), 1);
	}

	#[test]
	fn subfolder_creation_expands_parent() {
		let mut ws = Workspace::default();
		let parent = ws.create_folder("Parent", None).unwrap();
		assert!(!ws.is_folder_open(parent.as_str()));
		let child = ws.create_folder("Child", Some(&parent)).unwrap();
		assert!(ws.is_folder_open(parent.as_str()));
		assert_eq!(ws.folder(&child).unwrap().parent_id.as_ref(), Some(&parent));
		assert!(ws.create_folder("Orphan", Some(&FolderId::from("ghost"))).is_none());
		assert!(ws.create_folder("   ", None).is_none());
	}

	#[test]
	fn toggling_folder_open_round_trips() {
		let mut ws = Workspace::default();
		assert!(ws.toggle_folder_open(UNCATEGORIZED_KEY));
		assert!(ws.is_folder_open(UNCATEGORIZED_KEY));
		assert!(!ws.toggle_folder_open(UNCATEGORIZED_KEY));
	}

	#[test]
	fn tags_are_trimmed_and_deduplicated() {
		let mut ws = Workspace::default();
		let id = ws.create_note(Some("t"));
		ws.set_tags(&id, ["a ".to_owned(), "a".to_owned(), " ".to_owned(), "b".to_owned()]);
		assert_eq!(ws.note(&id).unwrap().tags, vec!["a".to_owned(), "b".to_owned()]);
	}
}
