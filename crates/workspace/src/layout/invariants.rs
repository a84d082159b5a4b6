use notepane_primitives::{DocumentId, Origin, Side};
use pretty_assertions::assert_eq;

use crate::layout::{LayoutController, LayoutEvent};
use crate::slot::ViewSlot;

mod catalog;

fn id(name: &str) -> DocumentId {
	DocumentId::from(name)
}

fn ids(names: &[&str]) -> Vec<DocumentId> {
	names.iter().map(|n| id(n)).collect()
}

fn layout_with(left: &[&str], right: &[&str]) -> LayoutController {
	let mut layout = LayoutController::new();
	for name in left {
		layout.open(Side::Left, &id(name), Origin::UserEdit);
	}
	for name in right {
		layout.open(Side::Right, &id(name), Origin::UserEdit);
	}
	layout
}

fn assert_pane_invariants(layout: &LayoutController) {
	if layout.split_mode() {
		assert!(!layout.slot(Side::Right).is_empty(), "split on with empty right pane");
	}
	if !layout.slot(Side::Right).is_empty() {
		assert!(!layout.slot(Side::Left).is_empty(), "left empty while right holds tabs");
	}
}

/// Must keep split mode off whenever the right pane is empty.
///
/// * Enforced in: `LayoutController::enable_split`, `LayoutController::cascade`
/// * Failure symptom: An empty right pane renders next to the left pane.
#[cfg_attr(test, test)]
pub(crate) fn test_split_never_on_with_empty_right() {
	let mut layout = layout_with(&["A"], &[]);
	assert!(layout.enable_split(Origin::UserEdit).is_empty());
	assert!(!layout.split_mode());

	layout.open(Side::Right, &id("B"), Origin::UserEdit);
	assert!(layout.split_mode());
	layout.close(Side::Right, &id("B"), Origin::UserEdit);
	assert!(!layout.split_mode());
	assert_pane_invariants(&layout);

	layout.move_across(Side::Left, &id("A"), Origin::UserEdit);
	assert_pane_invariants(&layout);
	layout.swap(Origin::UserEdit);
	assert_pane_invariants(&layout);
}

/// Must promote the right pane into the left pane when the left pane empties.
///
/// * Enforced in: `LayoutController::cascade`
/// * Failure symptom: The primary pane shows nothing while notes are open on the right.
#[cfg_attr(test, test)]
pub(crate) fn test_emptied_left_promotes_right() {
	let mut layout = layout_with(&["A"], &["X", "Y"]);
	layout.activate(Side::Right, &id("X"), Origin::UserEdit);

	let transition = layout.close(Side::Left, &id("A"), Origin::UserEdit);

	assert!(transition.contains(&LayoutEvent::Promoted));
	assert_eq!(layout.slot(Side::Left).tabs(), ids(&["X", "Y"]).as_slice());
	assert_eq!(layout.slot(Side::Left).active(), Some(&id("X")));
	assert!(layout.slot(Side::Right).is_empty());
	assert_eq!(layout.slot(Side::Right).active(), None);
	assert!(!layout.split_mode());
}

/// Must promote after moving the only left tab into an empty right pane.
///
/// * Enforced in: `LayoutController::drop_on_zone`, `LayoutController::cascade`
/// * Failure symptom: The only note ends up alone in the secondary pane.
#[cfg_attr(test, test)]
pub(crate) fn test_move_only_tab_across_then_promote() {
	let mut layout = layout_with(&["N1"], &[]);
	assert!(!layout.split_mode());

	let transition = layout.drop_on_zone(Side::Left, &id("N1"), Origin::UserEdit);

	assert_eq!(
		transition.to_vec(),
		vec![
			LayoutEvent::TabsChanged(Side::Left),
			LayoutEvent::TabsChanged(Side::Right),
			LayoutEvent::SplitChanged(true),
			LayoutEvent::Promoted,
			LayoutEvent::TabsChanged(Side::Left),
			LayoutEvent::TabsChanged(Side::Right),
			LayoutEvent::SplitChanged(false),
		]
	);
	assert_eq!(layout.slot(Side::Left), &ViewSlot::from_parts(ids(&["N1"]), Some(id("N1"))));
	assert_eq!(layout.slot(Side::Right), &ViewSlot::new());
	assert!(!layout.split_mode());
}

/// Must swap both panes wholesale when a tab is dropped on a non-empty opposite zone.
///
/// * Enforced in: `LayoutController::drop_on_zone`, `LayoutController::swap`
/// * Failure symptom: A single tab is inserted and the panes end up mixed.
#[cfg_attr(test, test)]
pub(crate) fn test_drop_on_occupied_zone_swaps() {
	let mut layout = layout_with(&["A", "B"], &["X"]);
	layout.activate(Side::Left, &id("A"), Origin::UserEdit);
	let left_before = layout.slot(Side::Left).clone();
	let right_before = layout.slot(Side::Right).clone();

	let transition = layout.drop_on_zone(Side::Left, &id("B"), Origin::UserEdit);

	assert!(transition.contains(&LayoutEvent::Swapped));
	assert_eq!(layout.slot(Side::Left), &right_before);
	assert_eq!(layout.slot(Side::Right), &left_before);
	assert!(layout.split_mode());
}

/// Must move the active pointer to the right neighbor, then the left neighbor, when the active tab closes.
///
/// * Enforced in: `ViewSlot::take`, `slot::move_across`
/// * Failure symptom: Closing a tab lands the user on an unexpected note.
#[cfg_attr(test, test)]
pub(crate) fn test_close_neighbor_selection() {
	let cases: &[(&[&str], &str, Option<&str>)] = &[
		(&["A", "B", "C"], "B", Some("C")),
		(&["A", "B"], "B", Some("A")),
		(&["A"], "A", None),
	];
	for (tabs, closed, expected) in cases {
		let mut layout = layout_with(tabs, &[]);
		layout.activate(Side::Left, &id(closed), Origin::UserEdit);
		layout.close(Side::Left, &id(closed), Origin::UserEdit);
		assert_eq!(layout.slot(Side::Left).active().map(DocumentId::as_str), *expected, "closing {closed} from {tabs:?}");
	}

	let mut layout = layout_with(&["A", "B", "C"], &["X"]);
	layout.activate(Side::Left, &id("B"), Origin::UserEdit);
	layout.move_across(Side::Left, &id("B"), Origin::UserEdit);
	assert_eq!(layout.slot(Side::Left).active(), Some(&id("C")));
	assert_eq!(layout.slot(Side::Right).active(), Some(&id("B")));
}

/// Must leave state untouched and publish nothing for ids that are not where the operation expects them.
///
/// * Enforced in: every `LayoutController` operation
/// * Failure symptom: Half-applied transitions or spurious session saves.
#[cfg_attr(test, test)]
pub(crate) fn test_invalid_ids_are_noops() {
	let mut layout = layout_with(&["A", "B"], &["X"]);
	let left = layout.slot(Side::Left).clone();
	let right = layout.slot(Side::Right).clone();
	let ghost = id("ghost");

	assert!(layout.close(Side::Left, &ghost, Origin::UserEdit).is_empty());
	assert!(layout.activate(Side::Left, &ghost, Origin::UserEdit).is_empty());
	assert!(layout.reorder(Side::Left, &ghost, &id("A"), Origin::UserEdit).is_empty());
	assert!(layout.move_across(Side::Left, &ghost, Origin::UserEdit).is_empty());
	assert!(layout.drop_on_zone(Side::Right, &ghost, Origin::UserEdit).is_empty());
	assert!(layout.drop_on_tab(Side::Left, &id("A"), Side::Right, &ghost, Origin::UserEdit).is_empty());
	assert!(layout.drop_on_tab(Side::Left, &ghost, Side::Right, &id("X"), Origin::UserEdit).is_empty());
	assert!(layout.close_others(Side::Left, &ghost, Origin::UserEdit).is_empty());
	assert!(layout.toggle_pin(&ghost, Origin::UserEdit).is_empty());

	assert_eq!(layout.slot(Side::Left), &left);
	assert_eq!(layout.slot(Side::Right), &right);
	assert!(layout.split_mode());
}

/// Must not mark the session dirty for transitions replayed at startup.
///
/// * Enforced in: `LayoutController::replay`, `Workspace::hydrate`
/// * Failure symptom: Startup rewrites the settings file it just read.
#[cfg_attr(test, test)]
pub(crate) fn test_replay_is_tagged() {
	use std::sync::Arc;

	use parking_lot::Mutex;

	let mut layout = LayoutController::new();
	let origins = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&origins);
	layout.subscribe(move |_: LayoutEvent, origin: Origin| sink.lock().push(origin));

	layout.replay(
		[(ids(&["A", "B"]), Some(id("B"))), (ids(&["X"]), None)],
		true,
		[id("A"), id("gone")],
	);

	assert!(!origins.lock().is_empty());
	assert!(origins.lock().iter().all(|origin| origin.is_replay()));
	assert_eq!(layout.slot(Side::Left).active(), Some(&id("B")));
	assert_eq!(layout.slot(Side::Right).active(), Some(&id("X")));
	assert!(layout.split_mode());
	assert!(layout.is_pinned(&id("A")));
	assert!(!layout.is_pinned(&id("gone")));
}
