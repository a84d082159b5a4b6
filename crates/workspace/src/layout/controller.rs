use std::collections::HashSet;

use notepane_primitives::{DocumentId, Origin, Side};
use tracing::{debug, trace};

use super::events::{LayoutEvent, LayoutObserver, ObserverId, Observers, Transition};
use crate::slot::{self, ViewSlot};

/// Owns both panes and the split flag.
///
/// Every public operation runs to completion, applies the split cascade,
/// and returns the [`Transition`] it produced. Observers receive the same
/// events once the transition is complete. Operations naming an id that is
/// not where they expect it return an empty transition and change nothing.
#[derive(Debug, Default)]
pub struct LayoutController {
	left: ViewSlot,
	right: ViewSlot,
	split: bool,
	pinned: HashSet<DocumentId>,
	observers: Observers,
}

impl LayoutController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn slot(&self, side: Side) -> &ViewSlot {
		match side {
			Side::Left => &self.left,
			Side::Right => &self.right,
		}
	}

	fn slot_mut(&mut self, side: Side) -> &mut ViewSlot {
		match side {
			Side::Left => &mut self.left,
			Side::Right => &mut self.right,
		}
	}

	/// Source and target slots for a cross-pane operation.
	fn pair_mut(&mut self, from: Side) -> (&mut ViewSlot, &mut ViewSlot) {
		match from {
			Side::Left => (&mut self.left, &mut self.right),
			Side::Right => (&mut self.right, &mut self.left),
		}
	}

	pub fn split_mode(&self) -> bool {
		self.split
	}

	pub fn pinned(&self) -> &HashSet<DocumentId> {
		&self.pinned
	}

	pub fn is_pinned(&self, id: &DocumentId) -> bool {
		self.pinned.contains(id)
	}

	/// Tabs of `side` in display order.
	pub fn ordered_tabs(&self, side: Side) -> Vec<&DocumentId> {
		self.slot(side).ordered(&self.pinned)
	}

	/// Panes currently holding a tab for `id`.
	pub fn sides_showing(&self, id: &DocumentId) -> impl Iterator<Item = Side> {
		Side::ALL.into_iter().filter(move |side| self.slot(*side).contains(id))
	}

	pub fn subscribe(&mut self, observer: impl LayoutObserver + 'static) -> ObserverId {
		self.observers.add(Box::new(observer))
	}

	pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
		self.observers.remove(id)
	}

	pub fn observer_count(&self) -> usize {
		self.observers.len()
	}

	/// Opens `id` in `side` and activates it. Opening into the right pane
	/// turns split mode on.
	pub fn open(&mut self, side: Side, id: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if self.slot_mut(side).open(id) {
			transition.push(LayoutEvent::TabsChanged(side));
		}
		if side == Side::Right {
			self.set_split(true, &mut transition);
		}
		self.finish(transition, origin)
	}

	pub fn activate(&mut self, side: Side, id: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if self.slot_mut(side).activate(id) {
			transition.push(LayoutEvent::TabsChanged(side));
		}
		self.finish(transition, origin)
	}

	/// Closes the tab for `id` in `side` and drops its pin.
	pub fn close(&mut self, side: Side, id: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if !self.slot_mut(side).close(id) {
			return transition;
		}
		self.pinned.remove(id);
		transition.push(LayoutEvent::TabsChanged(side));
		self.finish(transition, origin)
	}

	/// Closes `id` in both panes.
	pub fn close_everywhere(&mut self, id: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		for side in Side::ALL {
			transition.extend(self.close(side, id, origin));
		}
		transition
	}

	/// Closes every tab of `side` except `keep`, one close at a time.
	pub fn close_others(&mut self, side: Side, keep: &DocumentId, origin: Origin) -> Transition {
		if !self.slot(side).contains(keep) {
			return Transition::new();
		}
		let doomed: Vec<DocumentId> = self.slot(side).tabs().iter().filter(|id| *id != keep).cloned().collect();
		self.close_each(side, doomed, origin)
	}

	/// Closes every tab of `side`, one close at a time.
	pub fn close_all(&mut self, side: Side, origin: Origin) -> Transition {
		let doomed = self.slot(side).tabs().to_vec();
		self.close_each(side, doomed, origin)
	}

	fn close_each(&mut self, side: Side, doomed: Vec<DocumentId>, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		for id in &doomed {
			transition.extend(self.close(side, id, origin));
		}
		transition
	}

	/// Moves `id` just before `before` within `side`.
	pub fn reorder(&mut self, side: Side, id: &DocumentId, before: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if self.slot_mut(side).reorder(id, before) {
			transition.push(LayoutEvent::TabsChanged(side));
		}
		self.finish(transition, origin)
	}

	/// Moves `id` from `from` to the end of the opposite pane.
	pub fn move_across(&mut self, from: Side, id: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		let (source, target) = self.pair_mut(from);
		if !slot::move_across(source, target, id) {
			return transition;
		}
		transition.push(LayoutEvent::TabsChanged(from));
		transition.push(LayoutEvent::TabsChanged(from.opposite()));
		if from == Side::Left {
			self.set_split(true, &mut transition);
		}
		self.finish(transition, origin)
	}

	/// Drop of a tab from `from` onto the opposite pane's drop zone.
	///
	/// An empty target receives the single tab and split mode turns on. A
	/// non-empty target swaps both panes wholesale.
	pub fn drop_on_zone(&mut self, from: Side, id: &DocumentId, origin: Origin) -> Transition {
		if !self.slot(from).contains(id) {
			return Transition::new();
		}
		if self.slot(from.opposite()).is_empty() {
			let mut transition = Transition::new();
			let (source, target) = self.pair_mut(from);
			slot::move_across(source, target, id);
			transition.push(LayoutEvent::TabsChanged(from));
			transition.push(LayoutEvent::TabsChanged(from.opposite()));
			self.set_split(true, &mut transition);
			return self.finish(transition, origin);
		}
		self.swap(origin)
	}

	/// Exchanges both panes. Split stays on while both panes hold tabs.
	pub fn swap(&mut self, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if self.left.is_empty() && self.right.is_empty() {
			return transition;
		}
		slot::swap(&mut self.left, &mut self.right);
		transition.push(LayoutEvent::Swapped);
		transition.push(LayoutEvent::TabsChanged(Side::Left));
		transition.push(LayoutEvent::TabsChanged(Side::Right));
		if !self.left.is_empty() && !self.right.is_empty() {
			self.set_split(true, &mut transition);
		}
		self.finish(transition, origin)
	}

	/// Drop of a tab from `from` onto the tab `target` in `target_side`.
	///
	/// Within one pane this reorders. Across panes the tab leaves its source
	/// by the neighbor rule and lands active just before `target`.
	pub fn drop_on_tab(&mut self, from: Side, id: &DocumentId, target_side: Side, target: &DocumentId, origin: Origin) -> Transition {
		if from == target_side {
			return self.reorder(from, id, target, origin);
		}
		if id == target || !self.slot(from).contains(id) || !self.slot(target_side).contains(target) {
			return Transition::new();
		}

		let mut transition = Transition::new();
		let (source, dest) = self.pair_mut(from);
		source.take(id);
		if dest.contains(id) {
			dest.reorder(id, target);
			dest.activate(id);
		} else {
			dest.insert_before(id, target);
		}
		transition.push(LayoutEvent::TabsChanged(from));
		transition.push(LayoutEvent::TabsChanged(target_side));
		self.finish(transition, origin)
	}

	/// Turns split mode on. No-op while the right pane is empty.
	pub fn enable_split(&mut self, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if self.right.is_empty() {
			trace!("enable_split ignored: right pane empty");
			return transition;
		}
		self.set_split(true, &mut transition);
		self.finish(transition, origin)
	}

	/// Turns split mode off. Right pane tabs are kept but hidden.
	pub fn disable_split(&mut self, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		self.set_split(false, &mut transition);
		self.finish(transition, origin)
	}

	/// Flips the pin on `id`. Only ids open in some pane can be pinned.
	pub fn toggle_pin(&mut self, id: &DocumentId, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		if !self.pinned.remove(id) {
			if self.sides_showing(id).next().is_none() {
				return transition;
			}
			self.pinned.insert(id.clone());
		}
		let sides: Vec<Side> = self.sides_showing(id).collect();
		transition.extend(sides.into_iter().map(LayoutEvent::TabsChanged));
		self.finish(transition, origin)
	}

	/// Clears both panes and turns split off.
	pub fn home(&mut self, origin: Origin) -> Transition {
		let mut transition = Transition::new();
		for side in Side::ALL {
			if !self.slot_mut(side).clear().is_empty() {
				transition.push(LayoutEvent::TabsChanged(side));
			}
		}
		self.set_split(false, &mut transition);
		self.finish(transition, origin)
	}

	/// Rebuilds both panes from persisted state through [`ViewSlot::open`].
	///
	/// Split mode is honored only when the right pane ends up non-empty.
	pub(crate) fn replay(&mut self, panes: [(Vec<DocumentId>, Option<DocumentId>); 2], split: bool, pinned: impl IntoIterator<Item = DocumentId>) -> Transition {
		let mut transition = Transition::new();
		for (side, (tabs, active)) in Side::ALL.into_iter().zip(panes) {
			let pane = self.slot_mut(side);
			let mut changed = false;
			for id in &tabs {
				changed |= pane.open(id);
			}
			if let Some(active) = active.as_ref().filter(|id| tabs.contains(id)).or(tabs.first()) {
				changed |= pane.activate(active);
			}
			if changed {
				transition.push(LayoutEvent::TabsChanged(side));
			}
		}
		self.pinned = pinned.into_iter().filter(|id| self.sides_showing(id).next().is_some()).collect();
		if split && !self.right.is_empty() {
			self.set_split(true, &mut transition);
		}
		self.finish(transition, Origin::Replay)
	}

	fn set_split(&mut self, on: bool, transition: &mut Transition) {
		if self.split != on {
			self.split = on;
			transition.push(LayoutEvent::SplitChanged(on));
			debug!(split = on, "layout: split mode changed");
		}
	}

	/// Restores the pane invariants after a slot mutation.
	///
	/// An empty left pane takes over the right pane's content and split
	/// turns off. An empty right pane turns split off.
	fn cascade(&mut self, transition: &mut Transition) {
		if self.left.is_empty() && !self.right.is_empty() {
			self.left = self.right.clear();
			transition.push(LayoutEvent::Promoted);
			transition.push(LayoutEvent::TabsChanged(Side::Left));
			transition.push(LayoutEvent::TabsChanged(Side::Right));
			self.set_split(false, transition);
			debug!(tabs = self.left.len(), "layout: promoted right pane into left");
			return;
		}
		if self.right.is_empty() {
			self.set_split(false, transition);
		}
	}

	fn finish(&mut self, mut transition: Transition, origin: Origin) -> Transition {
		if transition.is_empty() {
			return transition;
		}
		self.cascade(&mut transition);
		debug_assert!(!self.split || !self.right.is_empty(), "split mode on with empty right pane");
		debug_assert!(self.right.is_empty() || !self.left.is_empty(), "left pane empty while right holds tabs");
		trace!(?origin, events = transition.len(), left = self.left.len(), right = self.right.len(), split = self.split, "layout transition");
		self.observers.publish(&transition, origin);
		transition
	}
}
