//! Per-pane tab lists.
//!
//! A [`ViewSlot`] is one pane's ordered set of open notes plus the active
//! pointer. Slot operations never touch split mode; the layout controller
//! applies the cascade afterwards.

use std::collections::HashSet;

use notepane_primitives::DocumentId;
use tracing::trace;

/// Tab list and active pointer for one pane.
///
/// `tabs` holds no duplicates and `active`, when set, is always a member of
/// `tabs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSlot {
	tabs: Vec<DocumentId>,
	active: Option<DocumentId>,
}

impl ViewSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a slot from persisted parts, dropping duplicate tabs.
	///
	/// An active id that is not among the tabs falls back to the first tab.
	pub fn from_parts(tabs: impl IntoIterator<Item = DocumentId>, active: Option<DocumentId>) -> Self {
		let mut seen = HashSet::new();
		let tabs: Vec<DocumentId> = tabs.into_iter().filter(|id| seen.insert(id.clone())).collect();
		let active = match active {
			Some(id) if tabs.contains(&id) => Some(id),
			_ => tabs.first().cloned(),
		};
		Self { tabs, active }
	}

	pub fn tabs(&self) -> &[DocumentId] {
		&self.tabs
	}

	pub fn active(&self) -> Option<&DocumentId> {
		self.active.as_ref()
	}

	pub fn is_empty(&self) -> bool {
		self.tabs.is_empty()
	}

	pub fn len(&self) -> usize {
		self.tabs.len()
	}

	pub fn contains(&self, id: &DocumentId) -> bool {
		self.tabs.contains(id)
	}

	fn position(&self, id: &DocumentId) -> Option<usize> {
		self.tabs.iter().position(|tab| tab == id)
	}

	/// Appends `id` when absent and makes it active.
	///
	/// Returns `false` when `id` was already the active tab.
	pub fn open(&mut self, id: &DocumentId) -> bool {
		if self.active.as_ref() == Some(id) {
			return false;
		}
		if !self.contains(id) {
			self.tabs.push(id.clone());
		}
		self.active = Some(id.clone());
		trace!(doc = %id, tabs = self.tabs.len(), "slot: opened");
		true
	}

	/// Activates an existing tab. No-op for unknown ids.
	pub fn activate(&mut self, id: &DocumentId) -> bool {
		if !self.contains(id) || self.active.as_ref() == Some(id) {
			return false;
		}
		self.active = Some(id.clone());
		true
	}

	/// Removes `id`, moving the active pointer per the neighbor rule.
	///
	/// When the closed tab was active, the tab that slides into its index
	/// (the right neighbor) becomes active, else the new last tab (the left
	/// neighbor), else nothing.
	pub fn close(&mut self, id: &DocumentId) -> bool {
		self.take(id).is_some()
	}

	/// Like [`ViewSlot::close`], returning the removed id.
	pub fn take(&mut self, id: &DocumentId) -> Option<DocumentId> {
		let idx = self.position(id)?;
		let removed = self.tabs.remove(idx);
		if self.active.as_ref() == Some(&removed) {
			self.active = self
				.tabs
				.get(idx)
				.or_else(|| idx.checked_sub(1).and_then(|prev| self.tabs.get(prev)))
				.cloned();
		}
		trace!(doc = %removed, active = ?self.active, "slot: closed");
		Some(removed)
	}

	/// Moves `id` to sit just before `before`. No-op when either is missing
	/// or they are the same tab.
	pub fn reorder(&mut self, id: &DocumentId, before: &DocumentId) -> bool {
		if id == before {
			return false;
		}
		let (Some(from), Some(_)) = (self.position(id), self.position(before)) else {
			return false;
		};
		let moved = self.tabs.remove(from);
		let to = self.position(before).unwrap_or(self.tabs.len());
		self.tabs.insert(to, moved);
		trace!(doc = %id, before = %before, "slot: reordered");
		true
	}

	/// Inserts a tab that is not yet present just before `target` and makes
	/// it active. No-op when `id` is already present or `target` is missing.
	pub fn insert_before(&mut self, id: &DocumentId, target: &DocumentId) -> bool {
		if self.contains(id) {
			return false;
		}
		let Some(idx) = self.position(target) else {
			return false;
		};
		self.tabs.insert(idx, id.clone());
		self.active = Some(id.clone());
		true
	}

	/// Empties the slot, returning what it held.
	pub fn clear(&mut self) -> ViewSlot {
		std::mem::take(self)
	}

	/// Display order: pinned tabs first, otherwise insertion order.
	pub fn ordered<'a>(&'a self, pinned: &HashSet<DocumentId>) -> Vec<&'a DocumentId> {
		let mut ordered: Vec<&DocumentId> = self.tabs.iter().collect();
		ordered.sort_by_key(|id| !pinned.contains(*id));
		ordered
	}
}

/// Moves `id` out of `from` (applying the neighbor rule) and appends it to
/// `to` as the active tab. No-op when `from` does not hold `id`.
pub fn move_across(from: &mut ViewSlot, to: &mut ViewSlot, id: &DocumentId) -> bool {
	let Some(moved) = from.take(id) else {
		return false;
	};
	to.open(&moved);
	true
}

/// Exchanges both slots wholesale, tabs and active pointers together.
pub fn swap(a: &mut ViewSlot, b: &mut ViewSlot) {
	std::mem::swap(a, b);
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	fn ids(names: &[&str]) -> Vec<DocumentId> {
		names.iter().map(|n| DocumentId::from(*n)).collect()
	}

	fn slot(names: &[&str], active: &str) -> ViewSlot {
		ViewSlot::from_parts(ids(names), Some(DocumentId::from(active)))
	}

	fn id(name: &str) -> DocumentId {
		DocumentId::from(name)
	}

	#[test]
	fn close_prefers_right_neighbor() {
		let mut s = slot(&["A", "B", "C"], "B");
		assert!(s.close(&id("B")));
		assert_eq!(s.tabs(), ids(&["A", "C"]).as_slice());
		assert_eq!(s.active(), Some(&id("C")));
	}

	#[test]
	fn close_falls_back_to_left_neighbor() {
		let mut s = slot(&["A", "B"], "B");
		s.close(&id("B"));
		assert_eq!(s.active(), Some(&id("A")));
	}

	#[test]
	fn close_last_tab_clears_active() {
		let mut s = slot(&["A"], "A");
		s.close(&id("A"));
		assert!(s.is_empty());
		assert_eq!(s.active(), None);
	}

	#[test]
	fn close_inactive_tab_keeps_active() {
		let mut s = slot(&["A", "B", "C"], "A");
		s.close(&id("C"));
		assert_eq!(s.active(), Some(&id("A")));
	}

	#[test]
	fn close_unknown_is_noop() {
		let mut s = slot(&["A"], "A");
		assert!(!s.close(&id("Z")));
		assert_eq!(s, slot(&["A"], "A"));
	}

	#[test]
	fn open_is_idempotent() {
		let mut s = ViewSlot::new();
		assert!(s.open(&id("A")));
		assert!(!s.open(&id("A")));
		s.open(&id("B"));
		s.open(&id("A"));
		assert_eq!(s.tabs(), ids(&["A", "B"]).as_slice());
		assert_eq!(s.active(), Some(&id("A")));
	}

	#[test]
	fn reorder_moves_before_target() {
		let mut s = slot(&["A", "B", "C"], "A");
		assert!(s.reorder(&id("C"), &id("A")));
		assert_eq!(s.tabs(), ids(&["C", "A", "B"]).as_slice());
		assert!(s.reorder(&id("C"), &id("B")));
		assert_eq!(s.tabs(), ids(&["A", "C", "B"]).as_slice());
		assert!(!s.reorder(&id("C"), &id("Z")));
		assert!(!s.reorder(&id("C"), &id("C")));
	}

	#[test]
	fn move_across_applies_neighbor_rule_to_source() {
		let mut left = slot(&["A", "B", "C"], "B");
		let mut right = slot(&["X"], "X");
		assert!(move_across(&mut left, &mut right, &id("B")));
		assert_eq!(left.active(), Some(&id("C")));
		assert_eq!(right.tabs(), ids(&["X", "B"]).as_slice());
		assert_eq!(right.active(), Some(&id("B")));
	}

	#[test]
	fn swap_exchanges_everything() {
		let mut left = slot(&["A", "B"], "B");
		let mut right = slot(&["X"], "X");
		swap(&mut left, &mut right);
		assert_eq!(left, slot(&["X"], "X"));
		assert_eq!(right, slot(&["A", "B"], "B"));
	}

	#[test]
	fn from_parts_dedupes_and_repairs_active() {
		let s = ViewSlot::from_parts(ids(&["A", "B", "A"]), Some(id("Z")));
		assert_eq!(s.tabs(), ids(&["A", "B"]).as_slice());
		assert_eq!(s.active(), Some(&id("A")));
	}

	#[test]
	fn pinned_tabs_sort_first_stably() {
		let s = slot(&["A", "B", "C", "D"], "A");
		let pinned: HashSet<DocumentId> = ids(&["C", "D"]).into_iter().collect();
		let order: Vec<&str> = s.ordered(&pinned).into_iter().map(|id| id.as_str()).collect();
		assert_eq!(order, vec!["C", "D", "A", "B"]);
		assert_eq!(s.tabs(), ids(&["A", "B", "C", "D"]).as_slice());
	}

	#[derive(Debug, Clone)]
	enum Op {
		Open(u8),
		Close(u8),
		Reorder(u8, u8),
		Activate(u8),
	}

	fn op() -> impl Strategy<Value = Op> {
		let n = 0u8..6;
		prop_oneof![
			n.clone().prop_map(Op::Open),
			n.clone().prop_map(Op::Close),
			(n.clone(), n.clone()).prop_map(|(a, b)| Op::Reorder(a, b)),
			n.prop_map(Op::Activate),
		]
	}

	proptest! {
		#[test]
		fn active_is_always_a_member(ops in proptest::collection::vec(op(), 0..48)) {
			let mut s = ViewSlot::new();
			for op in ops {
				match op {
					Op::Open(n) => { s.open(&id(&n.to_string())); }
					Op::Close(n) => { s.close(&id(&n.to_string())); }
					Op::Reorder(a, b) => { s.reorder(&id(&a.to_string()), &id(&b.to_string())); }
					Op::Activate(n) => { s.activate(&id(&n.to_string())); }
				}
				let unique: HashSet<&DocumentId> = s.tabs().iter().collect();
				prop_assert_eq!(unique.len(), s.len());
				match s.active() {
					Some(active) => prop_assert!(s.contains(active)),
					None => prop_assert!(s.is_empty()),
				}
			}
		}
	}
}
