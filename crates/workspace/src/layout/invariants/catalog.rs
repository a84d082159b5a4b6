//! Invariant catalog for [`crate::layout::LayoutController`].
#![allow(dead_code)]

/// Must keep split mode off whenever the right pane is empty.
///
/// - Enforced in: [`crate::layout::LayoutController::enable_split`], `LayoutController::cascade`
/// - Tested by: [`crate::layout::invariants::test_split_never_on_with_empty_right`]
/// - Failure symptom: An empty right pane renders next to the left pane.
pub(crate) const SPLIT_REQUIRES_RIGHT_CONTENT: () = ();

/// Must promote the right pane into the left pane when the left pane empties.
///
/// - Enforced in: `LayoutController::cascade`
/// - Tested by: [`crate::layout::invariants::test_emptied_left_promotes_right`], [`crate::layout::invariants::test_move_only_tab_across_then_promote`]
/// - Failure symptom: The primary pane shows nothing while notes are open on the right.
pub(crate) const LEFT_PANE_IS_PRIMARY: () = ();

/// Must swap both panes wholesale when a tab is dropped on a non-empty opposite zone.
///
/// - Enforced in: [`crate::layout::LayoutController::drop_on_zone`], [`crate::layout::LayoutController::swap`]
/// - Tested by: [`crate::layout::invariants::test_drop_on_occupied_zone_swaps`]
/// - Failure symptom: A single tab is inserted and the panes end up mixed.
pub(crate) const OCCUPIED_DROP_ZONE_SWAPS: () = ();

/// Must move the active pointer to the right neighbor, then the left neighbor, when the active tab closes.
///
/// - Enforced in: [`crate::slot::ViewSlot::take`], [`crate::slot::move_across`]
/// - Tested by: [`crate::layout::invariants::test_close_neighbor_selection`]
/// - Failure symptom: Closing a tab lands the user on an unexpected note.
pub(crate) const CLOSE_SELECTS_RIGHT_THEN_LEFT_NEIGHBOR: () = ();

/// Must leave state untouched and publish nothing for ids that are not where the operation expects them.
///
/// - Enforced in: every [`crate::layout::LayoutController`] operation
/// - Tested by: [`crate::layout::invariants::test_invalid_ids_are_noops`]
/// - Failure symptom: Half-applied transitions or spurious session saves.
pub(crate) const INVALID_IDS_ARE_NOOPS: () = ();

/// Must not mark the session dirty for transitions replayed at startup.
///
/// - Enforced in: [`crate::layout::LayoutController::replay`], [`crate::Workspace::hydrate`]
/// - Tested by: [`crate::layout::invariants::test_replay_is_tagged`]
/// - Failure symptom: Startup rewrites the settings file it just read.
pub(crate) const REPLAY_DOES_NOT_PERSIST: () = ();
