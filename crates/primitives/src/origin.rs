/// Where a mutation comes from.
///
/// Replayed mutations (undo/redo application, session restore at startup)
/// must not feed back into history capture or session persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Origin {
	/// A discrete user action or a settled edit.
	#[default]
	UserEdit,
	/// Re-application of previously recorded state.
	Replay,
}

impl Origin {
	/// Returns `true` for [`Origin::Replay`].
	pub const fn is_replay(self) -> bool {
		matches!(self, Self::Replay)
	}
}
