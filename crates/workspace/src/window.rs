//! Floating note windows.
//!
//! At most one window exists per note. Under [`WindowPolicy::Single`] at
//! most one window exists at all: opening a window for a note closes the
//! window of any other note first.

use indexmap::IndexMap;
use notepane_config::WindowPolicy;
use notepane_primitives::DocumentId;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// State of one floating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
	pub minimized: bool,
	/// Focus order; higher is on top.
	pub z: u64,
}

/// Result of [`WindowRegistry::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOpen {
	/// A fresh window was created after closing the listed windows.
	Created { closed: SmallVec<[DocumentId; 1]> },
	/// The note already had a visible window; it was only raised.
	Focused,
}

/// Registry of open floating windows keyed by note, in creation order.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
	policy: WindowPolicy,
	windows: IndexMap<DocumentId, WindowState>,
	z_top: u64,
}

impl WindowRegistry {
	pub fn new(policy: WindowPolicy) -> Self {
		Self {
			policy,
			windows: IndexMap::new(),
			z_top: 0,
		}
	}

	pub fn policy(&self) -> WindowPolicy {
		self.policy
	}

	pub fn get(&self, id: &DocumentId) -> Option<WindowState> {
		self.windows.get(id).copied()
	}

	pub fn contains(&self, id: &DocumentId) -> bool {
		self.windows.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.windows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.windows.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &WindowState)> {
		self.windows.iter()
	}

	fn raise(&mut self) -> u64 {
		self.z_top += 1;
		self.z_top
	}

	/// Opens (or focuses) the window for `id`.
	pub fn open(&mut self, id: &DocumentId) -> WindowOpen {
		let closed: SmallVec<[DocumentId; 1]> = match self.policy {
			WindowPolicy::Single => self.windows.keys().filter(|other| *other != id).cloned().collect(),
			WindowPolicy::Multiple => SmallVec::new(),
		};
		for other in &closed {
			self.windows.shift_remove(other);
			debug!(doc = %other, replaced_by = %id, "window: closed for single-window policy");
		}

		let z = self.raise();
		if let Some(state) = self.windows.get_mut(id)
			&& !state.minimized
		{
			state.z = z;
			trace!(doc = %id, z, "window: focused");
			return WindowOpen::Focused;
		}

		// A minimized window is re-created in place.
		self.windows.insert(id.clone(), WindowState { minimized: false, z });
		debug!(doc = %id, z, "window: created");
		WindowOpen::Created { closed }
	}

	/// Minimizes the window to the dock. Returns `false` for unknown ids or an
	/// already minimized window.
	pub fn minimize(&mut self, id: &DocumentId) -> bool {
		match self.windows.get_mut(id) {
			Some(state) if !state.minimized => {
				state.minimized = true;
				trace!(doc = %id, "window: minimized");
				true
			}
			_ => false,
		}
	}

	/// Restores a minimized window and raises it.
	pub fn restore(&mut self, id: &DocumentId) -> bool {
		let z = self.z_top + 1;
		match self.windows.get_mut(id) {
			Some(state) if state.minimized => {
				state.minimized = false;
				state.z = z;
				self.z_top = z;
				trace!(doc = %id, z, "window: restored");
				true
			}
			_ => false,
		}
	}

	pub fn close(&mut self, id: &DocumentId) -> bool {
		let removed = self.windows.shift_remove(id).is_some();
		if removed {
			trace!(doc = %id, "window: closed");
		}
		removed
	}

	/// Minimized windows in the order they were created.
	pub fn dock(&self) -> Vec<&DocumentId> {
		self.windows.iter().filter(|(_, state)| state.minimized).map(|(id, _)| id).collect()
	}

	/// Visible window with the highest focus order.
	pub fn focused(&self) -> Option<&DocumentId> {
		self.windows
			.iter()
			.filter(|(_, state)| !state.minimized)
			.max_by_key(|(_, state)| state.z)
			.map(|(id, _)| id)
	}

	/// Re-registers a window loaded from a session without applying the
	/// policy's closing rule.
	pub(crate) fn insert_restored(&mut self, id: DocumentId, minimized: bool) {
		if self.policy == WindowPolicy::Single && !self.windows.is_empty() {
			return;
		}
		let z = self.raise();
		self.windows.insert(id, WindowState { minimized, z });
	}
}
