//! The document surface consumed by the coordinator.

use std::fmt;

use mathpeek_primitives::{Position, Range, ScreenPoint};

use crate::region::AnchoredRegion;

/// Callback invoked with the new cursor position after every cursor move.
pub type CursorHandler = Box<dyn Fn(Position) + Send + Sync>;

/// Callback invoked when the document loses input focus.
pub type BlurHandler = Box<dyn Fn() + Send + Sync>;

/// Editor-side services the preview depends on.
///
/// Implementations own the text, cursor events and coordinate mapping; the
/// coordinator only reads through this narrow contract.
pub trait DocumentSurface {
	/// Live region type handed out by [`create_anchored_region`](Self::create_anchored_region).
	type Region: AnchoredRegion;

	/// Returns the text covered by `range`.
	fn text_for_range(&self, range: Range) -> String;

	/// Maps a document position to page coordinates.
	fn position_to_screen(&self, pos: Position) -> ScreenPoint;

	/// Registers a live-tracked region between `start` and `end`.
	fn create_anchored_region(&mut self, start: Position, end: Position) -> Self::Region;

	/// Registers a cursor-moved handler until the returned subscription is removed.
	fn subscribe_cursor_moved(&mut self, handler: CursorHandler) -> Subscription;

	/// Registers a focus-lost handler until the returned subscription is removed.
	fn subscribe_blur(&mut self, handler: BlurHandler) -> Subscription;
}

/// Handle to a registered document handler.
///
/// [`remove`](Self::remove) is idempotent. Dropping the handle removes the
/// handler as well.
#[must_use = "dropping a subscription removes its handler"]
pub struct Subscription {
	remove: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
	/// Creates a subscription that runs `remove` the first time it is removed.
	pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
		Self {
			remove: Some(Box::new(remove)),
		}
	}

	/// Unregisters the handler.
	pub fn remove(&mut self) {
		if let Some(remove) = self.remove.take() {
			remove();
		}
	}

	/// Returns true until the handler has been removed.
	pub fn is_active(&self) -> bool {
		self.remove.is_some()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.remove();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("active", &self.is_active()).finish()
	}
}
