//! Per-note undo/redo history.
//!
//! Each note owns a [`DocHistory`]: a linear log of [`HistoryEntry`] values
//! plus an index pointing at the entry that matches the current content.
//! [`HistoryStore`] holds the policy (capacity) and performs every mutation
//! on a borrowed log, so the log itself stays plain serializable data.
//!
//! # Mental Model
//!
//! ```text
//! entries: [A] [B] [C] [D]
//!                   ^ index
//! undo  -> index moves left, caller applies B
//! redo  -> index moves right, caller applies D
//! commit(E) after undo -> [A] [B] [E]  (redo branch discarded)
//! ```
//!
//! # Invariants
//!
//! - `index` is `None` only while `entries` is empty, and otherwise points
//!   inside `entries`.
//! - `entries.len()` never exceeds the store capacity; overflow evicts the
//!   oldest entry and keeps the index pinned at the tail.
//! - Entries are only captured at settle points (see [`coalesce`]); replayed
//!   content is never captured.

pub mod caret;
pub mod coalesce;

use notepane_primitives::{Cursor, Origin};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// Default number of entries kept per note.
pub const DEFAULT_CAPACITY: usize = 50;

/// One undo/redo checkpoint: content plus the caret at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
	#[serde(default, alias = "html")]
	pub content: String,
	#[serde(default)]
	pub cursor: Option<Cursor>,
	/// Keys this engine does not interpret, such as image attachments.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl HistoryEntry {
	pub fn new(content: impl Into<String>, cursor: Option<Cursor>) -> Self {
		Self {
			content: content.into(),
			cursor,
			extra: Map::new(),
		}
	}
}

/// Linear undo log owned by a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocHistory {
	#[serde(rename = "history")]
	entries: Vec<HistoryEntry>,
	#[serde(rename = "historyIndex", with = "wire_index")]
	index: Option<usize>,
}

/// `historyIndex` on disk is a signed integer where `-1` means no entry.
mod wire_index {
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(index: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
		match index.and_then(|idx| i64::try_from(idx).ok()) {
			Some(idx) => serializer.serialize_i64(idx),
			None => serializer.serialize_i64(-1),
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
		let raw = Option::<i64>::deserialize(deserializer)?;
		Ok(raw.and_then(|idx| usize::try_from(idx).ok()))
	}
}

impl DocHistory {
	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	/// Position of the entry matching the current content, `None` before the
	/// first commit.
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn can_undo(&self) -> bool {
		self.index.is_some_and(|idx| idx > 0)
	}

	pub fn can_redo(&self) -> bool {
		match self.index {
			Some(idx) => idx + 1 < self.entries.len(),
			None => false,
		}
	}

	/// Entry at the current index.
	pub fn current(&self) -> Option<&HistoryEntry> {
		self.index.and_then(|idx| self.entries.get(idx))
	}

	/// Repairs a log loaded from storage so the index invariant holds.
	pub(crate) fn normalize(&mut self, capacity: usize) {
		if self.entries.len() > capacity {
			let excess = self.entries.len() - capacity;
			self.entries.drain(..excess);
			self.index = self.index.map(|idx| idx.saturating_sub(excess));
		}
		self.index = match (self.entries.len(), self.index) {
			(0, _) => None,
			(len, Some(idx)) if idx < len => Some(idx),
			(len, _) => Some(len - 1),
		};
	}
}

/// Applies the undo/redo policy to [`DocHistory`] logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStore {
	capacity: usize,
}

impl Default for HistoryStore {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

impl HistoryStore {
	/// Creates a store with the given per-note capacity (at least 1).
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity: capacity.max(1),
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Captures content and caret into an entry.
	///
	/// Returns `None` for [`Origin::Replay`]: content being re-applied by
	/// undo/redo must not be recorded as a new edit.
	pub fn snapshot(&self, content: &str, cursor: Option<Cursor>, origin: Origin) -> Option<HistoryEntry> {
		if origin.is_replay() {
			trace!("history snapshot suppressed during replay");
			return None;
		}
		Some(HistoryEntry::new(content, cursor))
	}

	/// Appends `entry`, discarding any redo branch first.
	///
	/// When the log is full the oldest entry is evicted and the index stays
	/// on the tail instead of advancing.
	pub fn commit(&self, history: &mut DocHistory, entry: HistoryEntry) {
		let keep = history.index.map_or(0, |idx| idx + 1);
		let discarded = history.entries.len().saturating_sub(keep);
		history.entries.truncate(keep);
		history.entries.push(entry);

		if history.entries.len() > self.capacity {
			history.entries.remove(0);
			history.index = Some(history.entries.len() - 1);
		} else {
			history.index = Some(history.index.map_or(0, |idx| idx + 1));
		}

		trace!(
			len = history.entries.len(),
			index = ?history.index,
			discarded,
			"history entry committed"
		);
	}

	/// Steps back one entry and returns it for the caller to apply.
	///
	/// Returns `None` when already at the oldest entry (or the log is empty).
	pub fn undo(&self, history: &mut DocHistory) -> Option<HistoryEntry> {
		let idx = match history.index {
			Some(idx) if idx > 0 => idx - 1,
			_ => {
				trace!("undo: nothing to undo");
				return None;
			}
		};
		history.index = Some(idx);
		trace!(index = idx, len = history.entries.len(), "undo: stepped back");
		history.entries.get(idx).cloned()
	}

	/// Steps forward one entry and returns it for the caller to apply.
	///
	/// Returns `None` at the newest entry.
	pub fn redo(&self, history: &mut DocHistory) -> Option<HistoryEntry> {
		let idx = match history.index {
			Some(idx) if idx + 1 < history.entries.len() => idx + 1,
			_ => {
				trace!("redo: nothing to redo");
				return None;
			}
		};
		history.index = Some(idx);
		trace!(index = idx, len = history.entries.len(), "redo: stepped forward");
		history.entries.get(idx).cloned()
	}
}
