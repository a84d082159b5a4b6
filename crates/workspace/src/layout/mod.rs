//! Split layout over the two panes.
//!
//! [`LayoutController`] owns the left and right [`crate::slot::ViewSlot`]s,
//! the split flag and the pinned set. It is the only mutator of pane state.
//!
//! # Split state machine
//!
//! ```text
//!             enable_split (right non-empty)
//!   SplitOff ────────────────────────────────▶ SplitOn
//!      ▲                                          │
//!      └──── disable_split | right emptied ───────┘
//!            | left emptied (promote right)
//! ```
//!
//! The left pane is primary: it is never empty while the right pane holds
//! tabs, and split mode is never on while the right pane is empty.
//!
//! # Modules
//!
//! - `controller` - `LayoutController` and its transitions
//! - `events` - `LayoutEvent`, observers and `Transition`

mod controller;
mod events;

#[cfg(test)]
mod invariants;

pub use controller::LayoutController;
pub use events::{LayoutEvent, LayoutObserver, ObserverId, Transition};
