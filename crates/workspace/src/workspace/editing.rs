//! History capture from the editing surface, and undo/redo.
//!
//! The surface reports every change with [`Workspace::edit`]. Content is
//! applied to the note immediately; history entries are only committed at
//! settle points (see [`crate::history::coalesce`]). Undo and redo apply an
//! entry under [`Origin::Replay`] so the applied content is not captured
//! again.

use std::time::Instant;

use notepane_primitives::{Cursor, DocumentId, Origin};
use tracing::{debug, trace};

use super::Workspace;
use crate::history::caret::{CaretPlacement, FlatText, restore_caret};
use crate::history::coalesce::{Coalescer, EditTrigger};
use crate::history::{HistoryEntry, HistoryStore};
use crate::persist::Dirty;

/// What [`Workspace::edit`] did with a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
	/// A history entry was committed.
	Committed,
	/// A deferred commit was armed for the given deadline.
	Scheduled(Instant),
	/// Content was applied; nothing to record at this point.
	Applied,
	/// The note is locked and was left untouched.
	Locked,
	/// No such note.
	Unknown,
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
	/// The entry was applied to the note.
	Applied { content: String, caret: CaretPlacement },
	NothingToUndo,
	NothingToRedo,
	Unknown,
}

#[derive(Clone, Copy)]
enum Step {
	Undo,
	Redo,
}

impl Workspace {
	/// Applies `content` from the editing surface and records history at
	/// settle points.
	pub fn edit(&mut self, id: &DocumentId, content: &str, cursor: Option<Cursor>, trigger: EditTrigger, now: Instant) -> EditOutcome {
		let Some(note) = self.note(id) else {
			return EditOutcome::Unknown;
		};
		if note.locked {
			trace!(doc = %id, "edit ignored: note locked");
			return EditOutcome::Locked;
		}
		self.seed_history(id);

		if let Some(note) = self.note_mut(id)
			&& note.content != content
		{
			content.clone_into(&mut note.content);
			note.touch();
			self.mark(Dirty::NOTES);
		}
		let coalescer = self.coalescer(id);
		let typing_word = coalescer.typing_word();
		coalescer.observe(trigger, cursor);

		match trigger {
			EditTrigger::Formatting => {
				self.deferred.cancel(id);
				self.commit_pending(id, Origin::UserEdit)
			}
			EditTrigger::Boundary if typing_word => {
				self.deferred.cancel(id);
				self.commit_pending(id, Origin::UserEdit)
			}
			EditTrigger::Typing | EditTrigger::Boundary => EditOutcome::Scheduled(self.deferred.schedule(id, now)),
		}
	}

	/// Commits every deferred entry whose idle period has elapsed. Returns
	/// the notes that gained an entry.
	pub fn tick(&mut self, now: Instant) -> Vec<DocumentId> {
		self.deferred
			.take_due(now)
			.into_iter()
			.filter(|id| self.commit_pending(id, Origin::UserEdit) == EditOutcome::Committed)
			.collect()
	}

	/// Earliest pending deferred commit, for the host's timer.
	pub fn next_commit_deadline(&self) -> Option<Instant> {
		self.deferred.next_deadline()
	}

	pub fn undo(&mut self, id: &DocumentId) -> HistoryOutcome {
		self.step(id, Step::Undo)
	}

	pub fn redo(&mut self, id: &DocumentId) -> HistoryOutcome {
		self.step(id, Step::Redo)
	}

	fn step(&mut self, id: &DocumentId, step: Step) -> HistoryOutcome {
		if !self.has_note(id) {
			return HistoryOutcome::Unknown;
		}
		if self.deferred.cancel(id) {
			self.commit_pending(id, Origin::UserEdit);
		}

		let store = self.history;
		let Some(note) = self.note_mut(id) else {
			return HistoryOutcome::Unknown;
		};
		let entry = match step {
			Step::Undo => store.undo(&mut note.history),
			Step::Redo => store.redo(&mut note.history),
		};
		let Some(entry) = entry else {
			return match step {
				Step::Undo => HistoryOutcome::NothingToUndo,
				Step::Redo => HistoryOutcome::NothingToRedo,
			};
		};
		self.apply_entry(id, entry)
	}

	/// Writes a history entry back into the note as a replay.
	fn apply_entry(&mut self, id: &DocumentId, entry: HistoryEntry) -> HistoryOutcome {
		let HistoryEntry { content, cursor, .. } = entry;
		if let Some(note) = self.note_mut(id) {
			content.clone_into(&mut note.content);
			note.touch();
		}
		self.commit_pending(id, Origin::Replay);
		self.mark(Dirty::NOTES);

		let caret = restore_caret(&FlatText::new(&content), cursor);
		debug!(doc = %id, ?caret, "history entry applied");
		HistoryOutcome::Applied { content, caret }
	}

	/// Commits the note's current content if it differs from the last
	/// committed content. Under [`Origin::Replay`] nothing is recorded.
	fn commit_pending(&mut self, id: &DocumentId, origin: Origin) -> EditOutcome {
		let store: HistoryStore = self.history;
		let Some(content) = self.note(id).map(|note| note.content.clone()) else {
			return EditOutcome::Unknown;
		};
		let coalescer = self.coalescer(id);
		if !coalescer.has_changed(&content) {
			coalescer.settle(&content);
			return EditOutcome::Applied;
		}
		let cursor = coalescer.cursor();
		let Some(entry) = store.snapshot(&content, cursor, origin) else {
			// Replayed content becomes the new baseline without an entry.
			coalescer.settle(&content);
			return EditOutcome::Applied;
		};
		coalescer.settle(&content);
		if let Some(note) = self.note_mut(id) {
			store.commit(&mut note.history, entry);
		}
		self.mark(Dirty::NOTES);
		EditOutcome::Committed
	}

	/// Seeds an empty history with the note's current content the first
	/// time it is edited, so the first change can be undone.
	fn seed_history(&mut self, id: &DocumentId) {
		if self.coalescers.contains_key(id) {
			return;
		}
		let store = self.history;
		let Some(note) = self.note_mut(id) else {
			return;
		};
		let baseline = note.content.clone();
		if note.history.is_empty() {
			store.commit(&mut note.history, HistoryEntry::new(baseline.clone(), None));
		}
		self.coalescers.insert(id.clone(), Coalescer::new(baseline));
	}

	fn coalescer(&mut self, id: &DocumentId) -> &mut Coalescer {
		let baseline = self.note(id).map(|note| note.content.clone()).unwrap_or_default();
		self.coalescers.entry(id.clone()).or_insert_with(|| Coalescer::new(baseline))
	}

	/// Whether `id` has a history step available in each direction.
	pub fn can_undo_redo(&self, id: &DocumentId) -> (bool, bool) {
		self.note(id).map_or((false, false), |note| (note.history.can_undo(), note.history.can_redo()))
	}
}
