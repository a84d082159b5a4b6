//! Session snapshot: which notes were open where.
//!
//! Captured after every user-driven layout transition and stored inside
//! the settings blob as `sessionState`. Replayed once at startup.

use notepane_primitives::{DocumentId, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::{LayoutController, Transition};
use crate::window::WindowRegistry;

/// Serializable view of both panes and the split flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSnapshot {
	pub left_active: Option<DocumentId>,
	pub left_tabs: Vec<DocumentId>,
	pub right_active: Option<DocumentId>,
	pub right_tabs: Vec<DocumentId>,
	pub split_mode: bool,
	/// Floating windows in focus order, bottom first.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub windows: Vec<WindowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
	pub id: DocumentId,
	#[serde(default)]
	pub minimized: bool,
}

impl SessionSnapshot {
	pub fn capture(layout: &LayoutController, windows: &WindowRegistry) -> Self {
		let left = layout.slot(Side::Left);
		let right = layout.slot(Side::Right);
		let mut floating: Vec<_> = windows.iter().collect();
		floating.sort_by_key(|(_, state)| state.z);
		Self {
			left_active: left.active().cloned(),
			left_tabs: left.tabs().to_vec(),
			right_active: right.active().cloned(),
			right_tabs: right.tabs().to_vec(),
			split_mode: layout.split_mode(),
			windows: floating
				.into_iter()
				.map(|(id, state)| WindowSnapshot {
					id: id.clone(),
					minimized: state.minimized,
				})
				.collect(),
		}
	}

	/// Replays the snapshot into empty panes.
	///
	/// Ids for which `exists` is false are dropped. The whole replay runs
	/// under [`notepane_primitives::Origin::Replay`] so it never schedules a
	/// session save of its own.
	pub fn restore(&self, layout: &mut LayoutController, windows: &mut WindowRegistry, pinned: &[DocumentId], exists: impl Fn(&DocumentId) -> bool) -> Transition {
		let keep = |ids: &[DocumentId]| -> Vec<DocumentId> { ids.iter().filter(|id| exists(id)).cloned().collect() };
		let left_tabs = keep(&self.left_tabs);
		let right_tabs = keep(&self.right_tabs);
		let dropped = self.left_tabs.len() + self.right_tabs.len() - left_tabs.len() - right_tabs.len();

		let transition = layout.replay(
			[(left_tabs, self.left_active.clone()), (right_tabs, self.right_active.clone())],
			self.split_mode,
			pinned.iter().cloned(),
		);

		for window in self.windows.iter().filter(|window| exists(&window.id)) {
			windows.insert_restored(window.id.clone(), window.minimized);
		}

		debug!(
			left = layout.slot(Side::Left).len(),
			right = layout.slot(Side::Right).len(),
			split = layout.split_mode(),
			windows = windows.len(),
			dropped,
			"session restored"
		);
		transition
	}
}

#[cfg(test)]
mod tests {
	use notepane_config::WindowPolicy;
	use notepane_primitives::Origin;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn id(name: &str) -> DocumentId {
		DocumentId::from(name)
	}

	#[test]
	fn capture_then_restore_reproduces_layout() {
		let mut layout = LayoutController::new();
		layout.open(Side::Left, &id("A"), Origin::UserEdit);
		layout.open(Side::Left, &id("B"), Origin::UserEdit);
		layout.open(Side::Right, &id("C"), Origin::UserEdit);
		layout.activate(Side::Left, &id("A"), Origin::UserEdit);
		let mut windows = WindowRegistry::default();
		windows.open(&id("W"));
		windows.minimize(&id("W"));

		let snapshot = SessionSnapshot::capture(&layout, &windows);

		let mut restored = LayoutController::new();
		let mut restored_windows = WindowRegistry::default();
		snapshot.restore(&mut restored, &mut restored_windows, &[], |_| true);

		assert_eq!(SessionSnapshot::capture(&restored, &restored_windows), snapshot);
	}

	#[test]
	fn unknown_ids_are_dropped_and_split_needs_right_content() {
		let snapshot = SessionSnapshot {
			left_active: Some(id("A")),
			left_tabs: vec![id("A")],
			right_active: Some(id("gone")),
			right_tabs: vec![id("gone")],
			split_mode: true,
			windows: vec![WindowSnapshot {
				id: id("gone"),
				minimized: false,
			}],
		};
		let mut layout = LayoutController::new();
		let mut windows = WindowRegistry::new(WindowPolicy::Single);
		snapshot.restore(&mut layout, &mut windows, &[], |doc| doc.as_str() != "gone");

		assert_eq!(layout.slot(Side::Left).tabs(), &[id("A")]);
		assert!(layout.slot(Side::Right).is_empty());
		assert!(!layout.split_mode());
		assert!(windows.is_empty());
	}

	#[test]
	fn only_right_survives_so_it_is_promoted() {
		let snapshot = SessionSnapshot {
			left_tabs: vec![id("gone")],
			left_active: Some(id("gone")),
			right_tabs: vec![id("R")],
			right_active: Some(id("R")),
			split_mode: true,
			..SessionSnapshot::default()
		};
		let mut layout = LayoutController::new();
		snapshot.restore(&mut layout, &mut WindowRegistry::default(), &[], |doc| doc.as_str() != "gone");
		assert_eq!(layout.slot(Side::Left).active(), Some(&id("R")));
		assert!(layout.slot(Side::Right).is_empty());
		assert!(!layout.split_mode());
	}

	#[test]
	fn wire_shape_uses_camel_case() {
		let snapshot = SessionSnapshot {
			left_active: Some(id("A")),
			left_tabs: vec![id("A")],
			..SessionSnapshot::default()
		};
		assert_eq!(
			serde_json::to_value(&snapshot).unwrap(),
			json!({
				"leftActive": "A",
				"leftTabs": ["A"],
				"rightActive": null,
				"rightTabs": [],
				"splitMode": false
			})
		);
	}
}
