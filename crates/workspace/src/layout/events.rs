//! Layout change notifications.

use notepane_primitives::{Origin, Side};
use smallvec::SmallVec;

/// One observable effect of a layout transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEvent {
	/// A pane's tab list or active pointer changed.
	TabsChanged(Side),
	/// Split mode flipped to the given value.
	SplitChanged(bool),
	/// The right pane's content was promoted into the empty left pane.
	Promoted,
	/// Both panes exchanged their content.
	Swapped,
}

/// Events produced by one transition, in the order they happened.
///
/// Empty when the operation was a no-op.
pub type Transition = SmallVec<[LayoutEvent; 4]>;

/// Receives layout events after each transition completes.
pub trait LayoutObserver: Send {
	fn on_layout_event(&mut self, event: LayoutEvent, origin: Origin);
}

impl<F> LayoutObserver for F
where
	F: FnMut(LayoutEvent, Origin) + Send,
{
	fn on_layout_event(&mut self, event: LayoutEvent, origin: Origin) {
		self(event, origin)
	}
}

/// Handle returned by [`super::LayoutController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Registered observers in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
	entries: Vec<(ObserverId, Box<dyn LayoutObserver>)>,
	next_id: u64,
}

impl Observers {
	pub(crate) fn add(&mut self, observer: Box<dyn LayoutObserver>) -> ObserverId {
		let id = ObserverId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, observer));
		id
	}

	pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
		let before = self.entries.len();
		self.entries.retain(|(entry, _)| *entry != id);
		self.entries.len() != before
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	pub(crate) fn publish(&mut self, transition: &Transition, origin: Origin) {
		for event in transition {
			for (_, observer) in &mut self.entries {
				observer.on_layout_event(*event, origin);
			}
		}
	}
}

impl std::fmt::Debug for Observers {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Observers").field("count", &self.entries.len()).finish()
	}
}
