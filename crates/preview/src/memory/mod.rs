//! In-memory document model with live anchors.
//!
//! [`MemoryDocument`] implements [`DocumentSurface`] over a [`Rope`]. It keeps
//! an anchor table that is remapped through every edit, dispatches cursor and
//! blur handlers, and maps positions to screen space with fixed cell metrics.
//! Tests and headless embeddings drive it directly.
//!
//! Handlers run after the document lock is released, so a handler may call
//! back into the document.

mod overlay;
mod region;

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use mathpeek_primitives::{Bias, CharIdx, Position, Range, ScreenPoint, TextEdit, char_to_position, position_to_char};
use parking_lot::Mutex;
use ropey::Rope;
use tracing::trace;

pub use self::overlay::{OverlayCall, RecordingOverlay};
pub use self::region::MemoryRegion;
use crate::document::{BlurHandler, CursorHandler, DocumentSurface, Subscription};

type SharedCursorHandler = Arc<dyn Fn(Position) + Send + Sync>;
type SharedBlurHandler = Arc<dyn Fn() + Send + Sync>;

/// Fixed-size cell grid used to map positions to page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
	/// Page coordinate of line 0, column 0.
	pub origin: ScreenPoint,
	/// Width of one character cell in pixels.
	pub cell_width: i32,
	/// Height of one line in pixels.
	pub line_height: i32,
}

impl Default for CellMetrics {
	fn default() -> Self {
		Self {
			origin: ScreenPoint::new(0, 0),
			cell_width: 8,
			line_height: 16,
		}
	}
}

/// Live span of one anchored region, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
	start: CharIdx,
	end: CharIdx,
}

struct DocumentState {
	text: Rope,
	cursor: Position,
	metrics: CellMetrics,
	anchors: HashMap<u64, Anchor>,
	cursor_handlers: HashMap<u64, SharedCursorHandler>,
	blur_handlers: HashMap<u64, SharedBlurHandler>,
	next_id: u64,
}

impl DocumentState {
	fn new(text: &str, metrics: CellMetrics) -> Self {
		Self {
			text: Rope::from_str(text),
			cursor: Position::default(),
			metrics,
			anchors: HashMap::new(),
			cursor_handlers: HashMap::new(),
			blur_handlers: HashMap::new(),
			next_id: 0,
		}
	}

	fn next_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	fn char_span(&self, range: Range) -> (CharIdx, CharIdx) {
		let slice = self.text.slice(..);
		let start = position_to_char(slice, range.start);
		let end = position_to_char(slice, range.end).max(start);
		(start, end)
	}

	fn anchor_range(&self, anchor: Anchor) -> Range {
		let slice = self.text.slice(..);
		Range::new(char_to_position(slice, anchor.start), char_to_position(slice, anchor.end))
	}

	fn apply(&mut self, start: CharIdx, end: CharIdx, insert: &str) -> TextEdit {
		let edit = TextEdit::replace(start, end - start, insert.chars().count());
		self.text.remove(start..end);
		self.text.insert(start, insert);
		for anchor in self.anchors.values_mut() {
			anchor.start = edit.map_pos(anchor.start, Bias::Right);
			anchor.end = edit.map_pos(anchor.end, Bias::Right);
		}
		edit
	}
}

/// Shared handle to an in-memory document.
///
/// Cloning the handle shares the same document.
#[derive(Clone)]
pub struct MemoryDocument {
	inner: Arc<Mutex<DocumentState>>,
}

impl MemoryDocument {
	/// Creates a document holding `text` with default cell metrics.
	pub fn new(text: &str) -> Self {
		Self::with_metrics(text, CellMetrics::default())
	}

	/// Creates a document holding `text` with the given cell metrics.
	pub fn with_metrics(text: &str, metrics: CellMetrics) -> Self {
		Self {
			inner: Arc::new(Mutex::new(DocumentState::new(text, metrics))),
		}
	}

	/// Returns the full document text.
	pub fn text(&self) -> String {
		self.inner.lock().text.to_string()
	}

	/// Returns the current cursor position.
	pub fn cursor(&self) -> Position {
		self.inner.lock().cursor
	}

	/// Returns the number of live anchored regions.
	pub fn anchor_count(&self) -> usize {
		self.inner.lock().anchors.len()
	}

	/// Returns the number of registered cursor-moved handlers.
	pub fn cursor_handler_count(&self) -> usize {
		self.inner.lock().cursor_handlers.len()
	}

	/// Returns the number of registered blur handlers.
	pub fn blur_handler_count(&self) -> usize {
		self.inner.lock().blur_handlers.len()
	}

	/// Inserts `text` at `pos` without moving the cursor.
	pub fn insert(&self, pos: Position, text: &str) {
		self.replace(Range::point(pos), text);
	}

	/// Deletes the text between `range.start` and `range.end`.
	pub fn delete(&self, range: Range) {
		self.replace(range, "");
	}

	/// Replaces the text between `range.start` and `range.end` with `text`.
	pub fn replace(&self, range: Range, text: &str) {
		let mut state = self.inner.lock();
		let (start, end) = state.char_span(range);
		let edit = state.apply(start, end, text);
		trace!(at = edit.at, deleted = edit.deleted, inserted = edit.inserted, "memory_document.edit");
	}

	/// Inserts `text` at the cursor and moves the cursor past it, notifying
	/// cursor handlers like an editor does after a keystroke.
	pub fn type_text(&self, text: &str) {
		let next = {
			let mut state = self.inner.lock();
			let at = position_to_char(state.text.slice(..), state.cursor);
			let edit = state.apply(at, at, text);
			char_to_position(state.text.slice(..), at + edit.inserted)
		};
		self.move_cursor(next);
	}

	/// Moves the cursor and notifies cursor handlers.
	pub fn move_cursor(&self, pos: Position) {
		let handlers: Vec<SharedCursorHandler> = {
			let mut state = self.inner.lock();
			state.cursor = pos;
			state.cursor_handlers.values().cloned().collect()
		};
		for handler in handlers {
			handler(pos);
		}
	}

	/// Notifies blur handlers that the document lost focus.
	pub fn blur(&self) {
		let handlers: Vec<SharedBlurHandler> = self.inner.lock().blur_handlers.values().cloned().collect();
		for handler in handlers {
			handler();
		}
	}

	fn downgrade(&self) -> Weak<Mutex<DocumentState>> {
		Arc::downgrade(&self.inner)
	}
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new("")
	}
}

impl DocumentSurface for MemoryDocument {
	type Region = MemoryRegion;

	fn text_for_range(&self, range: Range) -> String {
		let state = self.inner.lock();
		let (start, end) = state.char_span(range);
		state.text.slice(start..end).to_string()
	}

	fn position_to_screen(&self, pos: Position) -> ScreenPoint {
		let metrics = self.inner.lock().metrics;
		let column = i32::try_from(pos.column).unwrap_or(i32::MAX);
		let line = i32::try_from(pos.line).unwrap_or(i32::MAX);
		ScreenPoint::new(
			metrics.origin.x.saturating_add(column.saturating_mul(metrics.cell_width)),
			metrics.origin.y.saturating_add(line.saturating_mul(metrics.line_height)),
		)
	}

	fn create_anchored_region(&mut self, start: Position, end: Position) -> MemoryRegion {
		let mut state = self.inner.lock();
		let (start, end) = state.char_span(Range::new(start, end));
		let anchor = Anchor { start, end };
		let id = state.next_id();
		state.anchors.insert(id, anchor);
		let range = state.anchor_range(anchor);
		MemoryRegion::new(self.inner.clone(), id, range)
	}

	fn subscribe_cursor_moved(&mut self, handler: CursorHandler) -> Subscription {
		let id = {
			let mut state = self.inner.lock();
			let id = state.next_id();
			state.cursor_handlers.insert(id, Arc::from(handler));
			id
		};
		let doc = self.downgrade();
		Subscription::new(move || {
			if let Some(doc) = doc.upgrade() {
				doc.lock().cursor_handlers.remove(&id);
			}
		})
	}

	fn subscribe_blur(&mut self, handler: BlurHandler) -> Subscription {
		let id = {
			let mut state = self.inner.lock();
			let id = state.next_id();
			state.blur_handlers.insert(id, Arc::from(handler));
			id
		};
		let doc = self.downgrade();
		Subscription::new(move || {
			if let Some(doc) = doc.upgrade() {
				doc.lock().blur_handlers.remove(&id);
			}
		})
	}
}

#[cfg(test)]
mod tests;
