use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mathpeek_primitives::{Position, Range, ScreenPoint};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;
use crate::document::DocumentSurface;
use crate::region::AnchoredRegion;

fn pos(line: usize, column: usize) -> Position {
	Position::new(line, column)
}

#[test]
fn region_tracks_insertions_before_it() {
	let mut doc = MemoryDocument::new("let $x^2$ be");
	let region = doc.create_anchored_region(pos(0, 5), pos(0, 8));
	assert_eq!(region.current_text(), "x^2");

	doc.insert(pos(0, 0), "now ");
	assert_eq!(region.current_range(), Range::new(pos(0, 9), pos(0, 12)));
	assert_eq!(region.current_text(), "x^2");
}

#[test]
fn region_grows_when_typing_at_its_end() {
	let mut doc = MemoryDocument::new("$x^2$");
	let region = doc.create_anchored_region(pos(0, 1), pos(0, 4));
	doc.insert(pos(0, 4), " + 1");
	assert_eq!(region.current_text(), "x^2 + 1");
	assert_eq!(region.current_range(), Range::new(pos(0, 1), pos(0, 8)));
}

#[test]
fn insertion_at_region_start_lands_outside() {
	let mut doc = MemoryDocument::new("$x$");
	let region = doc.create_anchored_region(pos(0, 1), pos(0, 2));
	doc.insert(pos(0, 1), "y");
	assert_eq!(region.current_text(), "x");
}

#[test]
fn deletion_spanning_region_collapses_it() {
	let mut doc = MemoryDocument::new("ab $x^2$ cd");
	let region = doc.create_anchored_region(pos(0, 4), pos(0, 7));
	doc.delete(Range::new(pos(0, 2), pos(0, 9)));
	let range = region.current_range();
	assert!(range.is_empty());
	assert!(!range.is_inverted());
	assert_eq!(region.current_text(), "");
	assert_eq!(doc.text(), "abcd");
}

#[test]
fn region_follows_multiline_edits() {
	let mut doc = MemoryDocument::new("intro\n$$\na + b\n$$\n");
	let region = doc.create_anchored_region(pos(2, 0), pos(2, 5));
	doc.insert(pos(0, 0), "title\n\n");
	assert_eq!(region.current_range(), Range::new(pos(4, 0), pos(4, 5)));
	assert_eq!(region.current_text(), "a + b");
}

#[test]
fn release_is_idempotent_and_drops_anchor() {
	let mut doc = MemoryDocument::new("x^2");
	let mut region = doc.create_anchored_region(pos(0, 0), pos(0, 3));
	assert_eq!(doc.anchor_count(), 1);
	region.release();
	region.release();
	assert!(region.is_released());
	assert_eq!(doc.anchor_count(), 0);
}

#[test]
fn dropping_region_releases_anchor() {
	let mut doc = MemoryDocument::new("x^2");
	drop(doc.create_anchored_region(pos(0, 0), pos(0, 3)));
	assert_eq!(doc.anchor_count(), 0);
}

#[test]
fn text_for_range_clamps_columns() {
	let doc = MemoryDocument::new("ab\ncd");
	assert_eq!(doc.text_for_range(Range::new(pos(0, 1), pos(1, 1))), "b\nc");
	assert_eq!(doc.text_for_range(Range::new(pos(0, 1), pos(0, 99))), "b");
}

#[test]
fn position_to_screen_uses_cell_metrics() {
	let doc = MemoryDocument::with_metrics(
		"",
		CellMetrics {
			origin: ScreenPoint::new(40, 100),
			cell_width: 7,
			line_height: 18,
		},
	);
	assert_eq!(doc.position_to_screen(pos(2, 3)), ScreenPoint::new(61, 136));
}

#[test]
fn cursor_handlers_run_until_removed() {
	let mut doc = MemoryDocument::new("x");
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	let mut sub = doc.subscribe_cursor_moved(Box::new(move |p| sink.lock().push(p)));
	assert_eq!(doc.cursor_handler_count(), 1);

	doc.move_cursor(pos(0, 1));
	sub.remove();
	doc.move_cursor(pos(0, 0));

	assert_eq!(*seen.lock(), vec![pos(0, 1)]);
	assert_eq!(doc.cursor_handler_count(), 0);
	assert_eq!(doc.cursor(), pos(0, 0));
}

#[test]
fn type_text_moves_cursor_and_notifies() {
	let mut doc = MemoryDocument::new("$x$");
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	let _sub = doc.subscribe_cursor_moved(Box::new(move |p| sink.lock().push(p)));

	doc.move_cursor(pos(0, 2));
	doc.type_text("^2");

	assert_eq!(doc.text(), "$x^2$");
	assert_eq!(doc.cursor(), pos(0, 4));
	assert_eq!(*seen.lock(), vec![pos(0, 2), pos(0, 4)]);
}

#[test]
fn blur_handlers_fire() {
	let mut doc = MemoryDocument::new("");
	let count = Arc::new(AtomicUsize::new(0));
	let counter = count.clone();
	let sub = doc.subscribe_blur(Box::new(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	}));
	doc.blur();
	drop(sub);
	doc.blur();
	assert_eq!(count.load(Ordering::SeqCst), 1);
	assert_eq!(doc.blur_handler_count(), 0);
}
