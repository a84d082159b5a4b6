//! Caret restoration after undo/redo.
//!
//! Recorded carets are character offsets into the *flattened* text of a
//! note: markup tags removed and the common entities decoded. Restoring is
//! best effort. An offset that no longer resolves against the restored
//! content places the caret at end of content instead of failing.

use notepane_primitives::Cursor;

/// A text view that can map flattened offsets back onto positions.
pub trait TextSurface {
	/// Length of the flattened text in characters.
	fn flat_len(&self) -> usize;

	/// Resolves a flattened offset to a caret position, or `None` when the
	/// offset does not exist in the current content.
	fn resolve(&self, offset: usize) -> Option<usize>;
}

/// Where the caret ends up after restoring a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPlacement {
	/// The recorded offset resolved exactly.
	Exact(Cursor),
	/// The recorded offset missed; caret collapsed at end of content.
	EndOfContent(usize),
	/// No caret was recorded with the entry.
	Unchanged,
}

impl CaretPlacement {
	/// Flattened offset of the placed caret, if any.
	pub fn offset(self) -> Option<usize> {
		match self {
			CaretPlacement::Exact(cursor) => Some(cursor.offset),
			CaretPlacement::EndOfContent(offset) => Some(offset),
			CaretPlacement::Unchanged => None,
		}
	}
}

/// Maps `cursor` onto `surface`, degrading to end of content on a miss.
pub fn restore_caret(surface: &impl TextSurface, cursor: Option<Cursor>) -> CaretPlacement {
	let Some(cursor) = cursor else {
		return CaretPlacement::Unchanged;
	};
	match surface.resolve(cursor.offset) {
		Some(offset) => CaretPlacement::Exact(Cursor { offset, ..cursor }),
		None => {
			tracing::debug!(offset = cursor.offset, len = surface.flat_len(), "caret offset unresolved; placing at end");
			CaretPlacement::EndOfContent(surface.flat_len())
		}
	}
}

/// Flattened view of a markup snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatText {
	text: String,
	len: usize,
}

impl FlatText {
	pub fn new(content: &str) -> Self {
		let text = flatten(content);
		let len = text.chars().count();
		Self { text, len }
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl TextSurface for FlatText {
	fn flat_len(&self) -> usize {
		self.len
	}

	fn resolve(&self, offset: usize) -> Option<usize> {
		(offset <= self.len).then_some(offset)
	}
}

const ENTITIES: &[(&str, char)] = &[
	("&amp;", '&'),
	("&lt;", '<'),
	("&gt;", '>'),
	("&quot;", '"'),
	("&#39;", '\''),
	("&apos;", '\''),
	("&nbsp;", '\u{a0}'),
];

/// Strips markup tags and decodes the common character entities.
///
/// An unterminated `<` is kept as text. Unknown entities are kept verbatim.
pub fn flatten(content: &str) -> String {
	let mut out = String::with_capacity(content.len());
	let mut rest = content;
	while let Some(ch) = rest.chars().next() {
		match ch {
			'<' => match rest.find('>') {
				Some(end) => rest = &rest[end + 1..],
				None => {
					out.push_str(rest);
					break;
				}
			},
			'&' => match ENTITIES.iter().find(|(name, _)| rest.starts_with(name)) {
				Some((name, decoded)) => {
					out.push(*decoded);
					rest = &rest[name.len()..];
				}
				None => {
					out.push('&');
					rest = &rest[1..];
				}
			},
			_ => {
				out.push(ch);
				rest = &rest[ch.len_utf8()..];
			}
		}
	}
	out
}
