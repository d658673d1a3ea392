//! Anchored regions: document ranges that follow edits.

use mathpeek_primitives::{Position, Range};

/// A live-tracked document range.
///
/// The owning document shifts both endpoints as edits land before or inside
/// the region, keeping `start <= end`. A region must be released before it is
/// discarded so the document can drop its tracking state.
///
/// Reading a released region is a programming error; implementations should
/// `debug_assert!` against it.
pub trait AnchoredRegion {
	/// Returns the region's current boundaries.
	fn current_range(&self) -> Range;

	/// Returns the region's current text.
	fn current_text(&self) -> String;

	/// Stops tracking. Calling this more than once is a no-op.
	fn release(&mut self);

	/// Returns true once [`release`](Self::release) has run.
	fn is_released(&self) -> bool;

	/// Returns true if `pos` lies within the current range, edges included.
	fn contains_position(&self, pos: Position) -> bool {
		self.current_range().contains(pos)
	}
}
