//! Events delivered to the coordinator's single logical thread.

use std::fmt;

use mathpeek_primitives::Position;
use tokio::sync::mpsc;

use crate::debounce::DebounceTicket;
use crate::engine::TypesetOutcome;

/// Identifies one render session for the lifetime of a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "session#{}", self.0)
	}
}

/// Something that happened outside the coordinator and must be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
	/// The document cursor moved while `session` was subscribed.
	CursorMoved {
		/// Session whose subscription produced the event.
		session: SessionId,
		/// New cursor position.
		position: Position,
	},
	/// The document lost input focus.
	Blur,
	/// A debounce countdown elapsed without being cancelled.
	DebounceElapsed(DebounceTicket),
	/// The typesetting engine finished a render dispatched for `session`.
	TypesetCompleted {
		/// Session that dispatched the render.
		session: SessionId,
		/// What the engine reported.
		outcome: TypesetOutcome,
	},
}

/// Sending half of the coordinator's event channel.
pub type EventSender = mpsc::UnboundedSender<PreviewEvent>;

/// Receiving half of the coordinator's event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<PreviewEvent>;
