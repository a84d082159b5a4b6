use serde::{Deserialize, Serialize};

/// Caret snapshot recorded with a history entry.
///
/// `offset` counts characters from the start of the document's flattened
/// text, independent of any markup structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
	pub offset: usize,
	pub is_collapsed: bool,
}

impl Cursor {
	/// A collapsed caret at `offset`.
	pub const fn at(offset: usize) -> Self {
		Self {
			offset,
			is_collapsed: true,
		}
	}
}
