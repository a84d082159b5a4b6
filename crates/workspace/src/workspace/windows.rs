use notepane_primitives::DocumentId;
use tracing::debug;

use super::Workspace;
use crate::persist::Dirty;
use crate::window::WindowOpen;

impl Workspace {
	/// Opens a floating window for a note, closing other windows as the
	/// configured policy requires. `None` for unknown notes.
	pub fn open_window(&mut self, id: &DocumentId) -> Option<WindowOpen> {
		if !self.has_note(id) {
			return None;
		}
		let opened = self.windows.open(id);
		if let WindowOpen::Created { closed } = &opened {
			debug!(doc = %id, closed = closed.len(), "floating window opened");
		}
		self.mark(Dirty::SETTINGS);
		Some(opened)
	}

	pub fn minimize_window(&mut self, id: &DocumentId) -> bool {
		let changed = self.windows.minimize(id);
		if changed {
			self.mark(Dirty::SETTINGS);
		}
		changed
	}

	pub fn restore_window(&mut self, id: &DocumentId) -> bool {
		let changed = self.windows.restore(id);
		if changed {
			self.mark(Dirty::SETTINGS);
		}
		changed
	}

	pub fn close_window(&mut self, id: &DocumentId) -> bool {
		let changed = self.windows.close(id);
		if changed {
			self.mark(Dirty::SETTINGS);
		}
		changed
	}
}
