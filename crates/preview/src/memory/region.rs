use std::fmt;
use std::sync::Arc;

use mathpeek_primitives::Range;
use parking_lot::Mutex;

use super::DocumentState;
use crate::region::AnchoredRegion;

/// Anchored region handed out by a [`MemoryDocument`](super::MemoryDocument).
///
/// Releasing (or dropping) the region removes its anchor from the document.
pub struct MemoryRegion {
	doc: Arc<Mutex<DocumentState>>,
	id: u64,
	released: bool,
	last_range: Range,
}

impl MemoryRegion {
	pub(super) fn new(doc: Arc<Mutex<DocumentState>>, id: u64, range: Range) -> Self {
		Self {
			doc,
			id,
			released: false,
			last_range: range,
		}
	}
}

impl AnchoredRegion for MemoryRegion {
	fn current_range(&self) -> Range {
		debug_assert!(!self.released, "anchored region read after release");
		let state = self.doc.lock();
		state.anchors.get(&self.id).map_or(self.last_range, |anchor| state.anchor_range(*anchor))
	}

	fn current_text(&self) -> String {
		debug_assert!(!self.released, "anchored region read after release");
		let state = self.doc.lock();
		match state.anchors.get(&self.id) {
			Some(anchor) => state.text.slice(anchor.start..anchor.end).to_string(),
			None => String::new(),
		}
	}

	fn release(&mut self) {
		if self.released {
			return;
		}
		let mut state = self.doc.lock();
		if let Some(anchor) = state.anchors.remove(&self.id) {
			self.last_range = state.anchor_range(anchor);
		}
		self.released = true;
	}

	fn is_released(&self) -> bool {
		self.released
	}
}

impl Drop for MemoryRegion {
	fn drop(&mut self) {
		self.release();
	}
}

impl fmt::Debug for MemoryRegion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryRegion")
			.field("id", &self.id)
			.field("released", &self.released)
			.finish()
	}
}
