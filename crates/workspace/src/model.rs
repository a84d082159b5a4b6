//! Persisted collections: notes, folders, trash items and settings.
//!
//! Field names serialize in camelCase so a data directory written by the
//! desktop app loads unchanged. Unknown note and settings keys survive a
//! round trip.

use chrono::{DateTime, Local, Utc};
use notepane_primitives::{DocumentId, FolderId};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::history::DocHistory;
use crate::session::SessionSnapshot;

/// A rich-text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
	pub id: DocumentId,
	#[serde(default)]
	pub title: String,
	/// Opaque markup snapshot.
	#[serde(default, alias = "contentHtml")]
	pub content: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub folder_id: Option<FolderId>,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
	#[serde(default = "Utc::now")]
	pub updated_at: DateTime<Utc>,
	#[serde(flatten)]
	pub history: DocHistory,
	#[serde(default)]
	pub locked: bool,
	/// Keys this engine does not interpret, such as `images`.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Note {
	/// Creates an empty note stamped with `now`.
	pub fn new(id: DocumentId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
		Self {
			id,
			title: title.into(),
			content: String::new(),
			tags: Vec::new(),
			folder_id: None,
			created_at: now,
			updated_at: now,
			history: DocHistory::default(),
			locked: false,
			extra: Map::new(),
		}
	}

	pub fn touch(&mut self) {
		self.updated_at = Utc::now();
	}
}

/// Title given to notes created without one, e.g. `Monday - 05/02/24`.
pub fn default_title(now: DateTime<Local>) -> String {
	now.format("%A - %d/%m/%y").to_string()
}

/// A folder in the sidebar tree. `parent_id == None` is a root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
	pub id: FolderId,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(default)]
	pub parent_id: Option<FolderId>,
}

/// Entry in the trash bin.
///
/// Items without a `type` key are notes, which is how the desktop app
/// writes trashed notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashItem {
	pub deleted_at: DateTime<Utc>,
	#[serde(flatten)]
	pub item: Trashed,
}

/// What was trashed. A trashed folder carries the notes that lived in it and
/// its whole subfolder tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trashed {
	Note(Note),
	Folder {
		#[serde(flatten)]
		folder: Folder,
		notes: Vec<Note>,
		subfolders: Vec<Folder>,
	},
}

impl<'de> Deserialize<'de> for TrashItem {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let fields = Map::<String, Value>::deserialize(deserializer)?;
		TrashItem::from_fields(fields).map_err(de::Error::custom)
	}
}

impl TrashItem {
	fn from_fields(mut fields: Map<String, Value>) -> serde_json::Result<Self> {
		let deleted_at = match fields.remove("deletedAt") {
			Some(Value::Null) | None => Utc::now(),
			Some(raw) => serde_json::from_value(raw)?,
		};
		let item = match fields.remove("type") {
			None => Trashed::Note(serde_json::from_value(Value::Object(fields))?),
			Some(Value::String(kind)) if kind == "note" => Trashed::Note(serde_json::from_value(Value::Object(fields))?),
			Some(Value::String(kind)) if kind == "folder" => {
				let notes = match fields.remove("notes") {
					Some(Value::Null) | None => Vec::new(),
					Some(raw) => serde_json::from_value(raw)?,
				};
				let subfolders = match fields.remove("subfolders") {
					Some(Value::Null) | None => Vec::new(),
					Some(raw) => serde_json::from_value(raw)?,
				};
				Trashed::Folder {
					folder: serde_json::from_value(Value::Object(fields))?,
					notes,
					subfolders,
				}
			}
			Some(other) => return Err(de::Error::custom(format!("unknown trash item type {other}"))),
		};
		Ok(Self { deleted_at, item })
	}

	/// Id of the trashed note or folder.
	pub fn id(&self) -> &str {
		match &self.item {
			Trashed::Note(note) => note.id.as_str(),
			Trashed::Folder { folder, .. } => folder.id.as_str(),
		}
	}

	pub fn label(&self) -> &str {
		match &self.item {
			Trashed::Note(note) => &note.title,
			Trashed::Folder { folder, .. } => &folder.name,
		}
	}
}

/// Application settings blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
	/// Sidebar opens go to the right pane when the left pane is busy.
	/// `None` defers to the configured default.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub auto_split_mode: Option<bool>,
	/// Expanded folders in the sidebar. The empty string is the
	/// uncategorized group.
	#[serde(default)]
	pub folders_open: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub pinned_tabs: Vec<DocumentId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session_state: Option<SessionSnapshot>,
	/// Keys owned by other parts of the app, kept verbatim.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
