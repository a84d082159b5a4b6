use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Wraps an existing identifier string.
			pub fn new(id: impl Into<String>) -> Self {
				Self(id.into())
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.to_owned())
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self(id)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
	};
}

string_id! {
	/// Opaque, stable identifier of a note.
	///
	/// The engine never interprets the contents; equality is the only
	/// meaningful operation.
	DocumentId
}

string_id! {
	/// Opaque identifier of a folder.
	FolderId
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_as_bare_string() {
		let id = DocumentId::from("n-1");
		assert_eq!(serde_json::to_string(&id).unwrap(), "\"n-1\"");
		let back: DocumentId = serde_json::from_str("\"n-1\"").unwrap();
		assert_eq!(back, id);
	}

	#[test]
	fn borrows_as_str_for_lookups() {
		let set: std::collections::HashSet<FolderId> = [FolderId::from("f")].into_iter().collect();
		assert!(set.contains("f"));
	}
}
