//! Settle-point batching for history capture.
//!
//! The editing surface reports every content change, but history only
//! records at settle points:
//!
//! - [`EditTrigger::Formatting`]: an explicit formatting action commits
//!   immediately.
//! - [`EditTrigger::Typing`]: free typing arms a single-shot deferred commit
//!   that fires after the idle period. Re-arming replaces the pending one.
//! - [`EditTrigger::Boundary`]: a word or punctuation boundary commits when
//!   a word was being typed.
//!
//! Commits are skipped when the content equals the last committed content.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use notepane_primitives::{Cursor, DocumentId};

/// Keys that end a word.
const WORD_BOUNDARY_KEYS: &[&str] = &[" ", "Enter", "Tab"];
/// Punctuation keys that also end a word.
const PUNCTUATION_KEYS: &[&str] = &[".", ",", "!", "?", ";", ":", "-"];

/// Why the editing surface is reporting a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTrigger {
	Formatting,
	Typing,
	Boundary,
}

impl EditTrigger {
	/// Classifies a key press from the editing surface.
	///
	/// Returns `None` for keys that neither type nor end a word, such as
	/// modified shortcuts or navigation keys.
	pub fn from_key(key: &str, modified: bool) -> Option<Self> {
		if WORD_BOUNDARY_KEYS.contains(&key) || PUNCTUATION_KEYS.contains(&key) {
			return Some(EditTrigger::Boundary);
		}
		(key.chars().count() == 1 && !modified).then_some(EditTrigger::Typing)
	}
}

/// Per-note capture state between commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coalescer {
	baseline: String,
	cursor: Option<Cursor>,
	typing_word: bool,
}

impl Coalescer {
	/// Starts tracking from content that is already recorded.
	pub fn new(baseline: impl Into<String>) -> Self {
		Self {
			baseline: baseline.into(),
			cursor: None,
			typing_word: false,
		}
	}

	/// Returns `true` when `content` differs from the last committed content.
	pub fn has_changed(&self, content: &str) -> bool {
		self.baseline != content
	}

	pub fn typing_word(&self) -> bool {
		self.typing_word
	}

	/// Latest caret reported by the editing surface.
	pub fn cursor(&self) -> Option<Cursor> {
		self.cursor
	}

	/// Records a change reported by the editing surface.
	pub fn observe(&mut self, trigger: EditTrigger, cursor: Option<Cursor>) {
		self.cursor = cursor;
		if trigger == EditTrigger::Typing {
			self.typing_word = true;
		}
	}

	/// Resets the baseline after a commit or a replayed entry.
	pub fn settle(&mut self, content: &str) {
		content.clone_into(&mut self.baseline);
		self.typing_word = false;
	}
}

/// Single-shot deferred commits, at most one pending per note.
#[derive(Debug, Clone)]
pub struct DeferredCommits {
	idle: Duration,
	due: HashMap<DocumentId, Instant>,
}

impl DeferredCommits {
	pub fn new(idle: Duration) -> Self {
		Self {
			idle,
			due: HashMap::new(),
		}
	}

	pub fn idle(&self) -> Duration {
		self.idle
	}

	/// Arms the commit for `doc`, replacing any pending deadline.
	pub fn schedule(&mut self, doc: &DocumentId, now: Instant) -> Instant {
		let deadline = now + self.idle;
		self.due.insert(doc.clone(), deadline);
		deadline
	}

	/// Disarms the pending commit for `doc`. Returns whether one was pending.
	pub fn cancel(&mut self, doc: &DocumentId) -> bool {
		self.due.remove(doc).is_some()
	}

	pub fn is_pending(&self, doc: &DocumentId) -> bool {
		self.due.contains_key(doc)
	}

	/// Earliest pending deadline, for driving a timer.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.due.values().min().copied()
	}

	/// Removes and returns every note whose deadline has passed, ordered by
	/// deadline then id.
	pub fn take_due(&mut self, now: Instant) -> Vec<DocumentId> {
		let mut ready: Vec<(Instant, DocumentId)> = self
			.due
			.iter()
			.filter(|(_, deadline)| **deadline <= now)
			.map(|(doc, deadline)| (*deadline, doc.clone()))
			.collect();
		ready.sort();
		for (_, doc) in &ready {
			self.due.remove(doc);
		}
		ready.into_iter().map(|(_, doc)| doc).collect()
	}
}
