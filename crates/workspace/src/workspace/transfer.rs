//! Duplicating notes and moving the notes list in and out as JSON.

use chrono::{DateTime, Local, Utc};
use notepane_primitives::{DocumentId, FolderId, Side};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::Workspace;
use crate::history::DocHistory;
use crate::model::{Folder, Note};
use crate::persist::Dirty;

/// Errors raised by [`Workspace::import_notes`].
#[derive(Debug, Error)]
pub enum ImportError {
	#[error("import is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("import must be a JSON array of notes")]
	NotAnArray,
}

/// What one import created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
	pub folder: FolderId,
	pub folder_name: String,
	/// New ids, in file order.
	pub notes: Vec<DocumentId>,
}

/// A note as found in an export file. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct IncomingNote {
	title: Option<String>,
	content_html: Option<String>,
	content: Option<String>,
	tags: Option<Vec<String>>,
	images: Option<Value>,
	#[serde(flatten)]
	history: DocHistory,
	created_at: Option<DateTime<Utc>>,
	updated_at: Option<DateTime<Utc>>,
}

/// Folder an import made at `now` lands in, e.g.
/// `Imported - Mar 5, 09:41 AM`.
pub fn import_folder_name(now: DateTime<Local>) -> String {
	format!("Imported - {}", now.format("%b %-d, %I:%M %p"))
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|text| !text.is_empty())
}

impl Workspace {
	/// Copies a note under a new id with a `(copy)` title and fresh
	/// timestamps, appends it and opens it in the left pane.
	pub fn duplicate_note(&mut self, id: &DocumentId) -> Option<DocumentId> {
		let mut copy = self.note(id)?.clone();
		let now = Utc::now();
		copy.id = DocumentId::new(Uuid::new_v4().to_string());
		copy.title = format!("{} (copy)", copy.title);
		copy.created_at = now;
		copy.updated_at = now;
		let copy_id = copy.id.clone();
		self.notes.push(copy);
		self.mark(Dirty::NOTES);
		debug!(doc = %copy_id, source = %id, "note duplicated");
		self.open_in(Side::Left, &copy_id);
		Some(copy_id)
	}

	/// The notes list as pretty-printed JSON, in the same shape as
	/// `notes.json`.
	pub fn export_notes(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(&self.notes)
	}

	/// Adds every note of an exported list under new ids.
	///
	/// Notes land at the top of the list inside an `Imported - <date>`
	/// folder, which is created and expanded unless one with that name
	/// already exists. Missing titles become `Imported`; missing timestamps
	/// become `now`. Nothing changes when the input is rejected.
	pub fn import_notes(&mut self, raw: &str, now: DateTime<Local>) -> Result<ImportSummary, ImportError> {
		let value: Value = serde_json::from_str(raw)?;
		if !value.is_array() {
			return Err(ImportError::NotAnArray);
		}
		let incoming: Vec<IncomingNote> = serde_json::from_value(value)?;

		let folder_name = import_folder_name(now);
		let folder = match self.folders.iter().find(|folder| folder.name == folder_name) {
			Some(existing) => existing.id.clone(),
			None => {
				let id = FolderId::new(Uuid::new_v4().to_string());
				self.folders.push(Folder {
					id: id.clone(),
					name: folder_name.clone(),
					icon: None,
					parent_id: None,
				});
				self.mark(Dirty::FOLDERS);
				self.set_folder_open(id.as_str(), true);
				id
			}
		};

		let stamp = now.with_timezone(&Utc);
		let capacity = self.history.capacity();
		let mut created = Vec::with_capacity(incoming.len());
		for item in incoming {
			let id = DocumentId::new(Uuid::new_v4().to_string());
			let title = non_blank(item.title).unwrap_or_else(|| "Imported".to_owned());
			let mut note = Note::new(id.clone(), title, item.created_at.unwrap_or(stamp));
			note.updated_at = item.updated_at.unwrap_or(stamp);
			note.content = non_blank(item.content_html).or_else(|| non_blank(item.content)).unwrap_or_default();
			note.tags = item.tags.unwrap_or_default();
			note.folder_id = Some(folder.clone());
			note.history = item.history;
			note.history.normalize(capacity);
			note.extra.insert("images".to_owned(), item.images.unwrap_or_else(|| Value::Array(Vec::new())));
			self.notes.insert(0, note);
			created.push(id);
		}
		self.mark(Dirty::NOTES);
		info!(folder = %folder, notes = created.len(), "notes imported");
		Ok(ImportSummary {
			folder,
			folder_name,
			notes: created,
		})
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn at_nine() -> DateTime<Local> {
		Local.with_ymd_and_hms(2024, 3, 5, 9, 41, 0).unwrap()
	}

	#[test]
	fn folder_name_uses_short_month_and_clock() {
		assert_eq!(import_folder_name(at_nine()), "Imported - Mar 5, 09:41 AM");
	}

	#[test]
	fn duplicate_copies_content_under_a_new_id() {
		let mut ws = Workspace::default();
		let source = ws.create_note(Some("Plan"));
		ws.set_tags(&source, ["work".to_owned()]);
		ws.take_persist_jobs();

		let copy = ws.duplicate_note(&source).unwrap();
		assert_ne!(copy, source);
		let note = ws.note(&copy).unwrap();
		assert_eq!(note.title, "Plan (copy)");
		assert_eq!(note.tags, vec!["work".to_owned()]);
		assert_eq!(ws.notes().last().map(|note| &note.id), Some(&copy));
		assert_eq!(ws.layout().slot(Side::Left).active(), Some(&copy));
		assert!(ws.dirty().contains(Dirty::NOTES));
		assert!(ws.duplicate_note(&DocumentId::from("ghost")).is_none());
	}

	#[test]
	fn import_fills_defaults_and_lands_in_an_open_folder() {
		let mut ws = Workspace::default();
		let existing = ws.create_note(Some("mine"));
		let raw = json!([
			{ "title": "First", "contentHtml": "<p>a</p>", "tags": ["x"], "images": [{ "id": "i" }], "id": "old-1" },
			{ "title": "", "content": "<p>b</p>", "history": [{ "html": "<p>b</p>" }], "historyIndex": -1 },
			{}
		])
		.to_string();

		let summary = ws.import_notes(&raw, at_nine()).unwrap();
		assert_eq!(summary.folder_name, "Imported - Mar 5, 09:41 AM");
		assert_eq!(summary.notes.len(), 3);
		assert!(ws.is_folder_open(summary.folder.as_str()));
		assert!(ws.dirty().contains(Dirty::NOTES | Dirty::FOLDERS | Dirty::SETTINGS));

		let titles: Vec<&str> = ws.notes().iter().map(|note| note.title.as_str()).collect();
		assert_eq!(titles, vec!["Imported", "Imported", "First", "mine"]);
		assert!(ws.note(&DocumentId::from("old-1")).is_none());

		let first = ws.note(&summary.notes[0]).unwrap();
		assert_eq!(first.content, "<p>a</p>");
		assert_eq!(first.extra["images"][0]["id"], "i");
		assert_eq!(first.folder_id.as_ref(), Some(&summary.folder));
		assert_eq!(first.created_at, at_nine().with_timezone(&Utc));

		let second = ws.note(&summary.notes[1]).unwrap();
		assert_eq!(second.content, "<p>b</p>");
		assert_eq!(second.history.index(), Some(0));
		assert!(ws.note(&summary.notes[2]).unwrap().history.is_empty());
		assert_eq!(ws.note(&existing).unwrap().folder_id, None);
	}

	#[test]
	fn second_import_in_the_same_minute_reuses_the_folder() {
		let mut ws = Workspace::default();
		let first = ws.import_notes("[{}]", at_nine()).unwrap();
		let second = ws.import_notes("[{}]", at_nine()).unwrap();
		assert_eq!(first.folder, second.folder);
		assert_eq!(ws.folders().len(), 1);
	}

	#[test]
	fn rejected_input_changes_nothing() {
		let mut ws = Workspace::default();
		assert!(matches!(ws.import_notes("{\"title\": \"x\"}", at_nine()), Err(ImportError::NotAnArray)));
		assert!(matches!(ws.import_notes("[1, 2]", at_nine()), Err(ImportError::Json(_))));
		assert!(matches!(ws.import_notes("not json", at_nine()), Err(ImportError::Json(_))));
		assert!(ws.folders().is_empty());
		assert!(ws.dirty().is_empty());
	}

	#[test]
	fn export_reimports_as_copies() {
		let mut ws = Workspace::default();
		let id = ws.create_note(Some("Round"));
		let exported = ws.export_notes().unwrap();
		let listed: Value = serde_json::from_str(&exported).unwrap();
		assert_eq!(listed[0]["id"], id.as_str());

		let summary = ws.import_notes(&exported, at_nine()).unwrap();
		assert_eq!(ws.note(&summary.notes[0]).unwrap().title, "Round");
		assert_eq!(ws.notes().len(), 2);
	}
}
