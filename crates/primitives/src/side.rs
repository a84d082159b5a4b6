use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two fixed pane positions.
///
/// The left pane is primary: it is never left empty while the right pane
/// still holds tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Left,
	Right,
}

impl Side {
	/// Both sides, primary first.
	pub const ALL: [Side; 2] = [Side::Left, Side::Right];

	/// Returns the other pane.
	pub const fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Side::Left => "left",
			Side::Right => "right",
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a pane name is neither `left` nor `right`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pane side '{0}' (expected 'left' or 'right')")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
	type Err = ParseSideError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"left" | "l" => Ok(Side::Left),
			"right" | "r" => Ok(Side::Right),
			_ => Err(ParseSideError(s.to_owned())),
		}
	}
}
