use notepane_primitives::{DocumentId, Origin, Side};
use tracing::debug;

use super::Workspace;
use crate::layout::Transition;

impl Workspace {
	/// Opens a note from the sidebar.
	///
	/// With auto split on and a different note active on the left, the note
	/// goes to the right pane and split turns on. Otherwise it opens on the
	/// left. Returns the pane it landed in.
	pub fn open_note(&mut self, id: &DocumentId) -> Option<Side> {
		if !self.has_note(id) {
			return None;
		}
		let left_active = self.layout.slot(Side::Left).active();
		let side = match left_active {
			Some(active) if active != id && self.auto_split() => Side::Right,
			_ => Side::Left,
		};
		self.open_in(side, id);
		debug!(doc = %id, %side, "note opened");
		Some(side)
	}

	/// Opens a note in a specific pane.
	pub fn open_in(&mut self, side: Side, id: &DocumentId) -> bool {
		if !self.has_note(id) {
			return false;
		}
		let transition = self.layout.open(side, id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	/// Opens `id` beside the current note and turns split on.
	pub fn split_note(&mut self, id: &DocumentId) -> bool {
		self.open_in(Side::Right, id)
	}

	pub fn activate_tab(&mut self, side: Side, id: &DocumentId) -> bool {
		let transition = self.layout.activate(side, id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn close_tab(&mut self, side: Side, id: &DocumentId) -> bool {
		let transition = self.layout.close(side, id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn close_other_tabs(&mut self, side: Side, keep: &DocumentId) -> bool {
		let transition = self.layout.close_others(side, keep, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn close_all_tabs(&mut self, side: Side) -> bool {
		let transition = self.layout.close_all(side, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn reorder_tab(&mut self, side: Side, id: &DocumentId, before: &DocumentId) -> bool {
		let transition = self.layout.reorder(side, id, before, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	/// Moves a tab to the end of the other pane.
	pub fn move_tab_across(&mut self, from: Side, id: &DocumentId) -> bool {
		let transition = self.layout.move_across(from, id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	/// Drops a tab on the opposite pane's drop zone: move into an empty
	/// pane, swap with an occupied one.
	pub fn drop_on_zone(&mut self, from: Side, id: &DocumentId) -> bool {
		let transition = self.layout.drop_on_zone(from, id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	/// Drops a tab onto another tab, in the same or the other pane.
	pub fn drop_on_tab(&mut self, from: Side, id: &DocumentId, target_side: Side, target: &DocumentId) -> bool {
		let transition = self.layout.drop_on_tab(from, id, target_side, target, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn swap_panes(&mut self) -> bool {
		let transition = self.layout.swap(Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn enable_split(&mut self) -> bool {
		let transition = self.layout.enable_split(Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn disable_split(&mut self) -> bool {
		let transition = self.layout.disable_split(Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	pub fn toggle_pin(&mut self, id: &DocumentId) -> bool {
		let transition = self.layout.toggle_pin(id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	/// Returns to the empty home view.
	pub fn home(&mut self) -> bool {
		let transition = self.layout.home(Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit)
	}

	/// Tabs of `side` in display order, pinned first.
	pub fn ordered_tabs(&self, side: Side) -> Vec<&DocumentId> {
		self.layout.ordered_tabs(side)
	}

	/// Removes every view of a note that is going away.
	pub(crate) fn forget_views(&mut self, id: &DocumentId) -> Transition {
		let transition = self.layout.close_everywhere(id, Origin::UserEdit);
		self.settle_layout(&transition, Origin::UserEdit);
		if self.windows.close(id) {
			self.mark(crate::persist::Dirty::SETTINGS);
		}
		self.deferred.cancel(id);
		self.coalescers.remove(id);
		transition
	}
}
