//! Value types shared across the notepane crates: identifiers, pane sides,
//! caret snapshots and mutation origins.

/// Caret position captured alongside history entries.
pub mod cursor;
/// Identifier newtypes for notes and folders.
pub mod ids;
/// Origin tags threaded through mutations to suppress feedback loops.
pub mod origin;
/// The two fixed pane positions.
pub mod side;

pub use cursor::Cursor;
pub use ids::{DocumentId, FolderId};
pub use origin::Origin;
pub use side::{ParseSideError, Side};
