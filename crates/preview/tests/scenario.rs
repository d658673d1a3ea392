#![allow(unused_crate_dependencies)]

//! End-to-end preview sessions against the in-memory document.

use std::sync::Arc;
use std::time::Duration;

use mathpeek_preview::memory::{MemoryDocument, OverlayCall, RecordingOverlay};
use mathpeek_preview::{
	BoxFutureStatic, FnTypesetEngine, PreviewConfig, RenderCoordinator, TypesetError, TypesetOutcome,
};
use mathpeek_primitives::{Position, Range, ScreenPoint};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tokio::task::yield_now;
use tokio::time::advance;

type Coordinator = RenderCoordinator<MemoryDocument, RecordingOverlay>;

/// Engine that completes immediately and fails on unbalanced braces.
fn echo_engine(log: Arc<Mutex<Vec<String>>>) -> impl mathpeek_preview::TypesetEngine {
	FnTypesetEngine::new(move |_surface, text| -> BoxFutureStatic<TypesetOutcome> {
		log.lock().push(text.clone());
		Box::pin(async move {
			if text.matches('{').count() != text.matches('}').count() {
				TypesetOutcome::failure(text, TypesetError::Markup("missing closing brace".into()))
			} else {
				TypesetOutcome::success(text)
			}
		})
	})
}

fn setup(text: &str) -> (MemoryDocument, Arc<Mutex<Vec<String>>>, Coordinator) {
	let _ = tracing_subscriber::fmt::try_init();
	let doc = MemoryDocument::new(text);
	let log = Arc::new(Mutex::new(Vec::new()));
	let coord = RenderCoordinator::new(
		doc.clone(),
		RecordingOverlay::default(),
		echo_engine(log.clone()),
		PreviewConfig::default(),
	);
	(doc, log, coord)
}

async fn settle(coord: &mut Coordinator, by: Duration) {
	yield_now().await;
	advance(by).await;
	for _ in 0..3 {
		yield_now().await;
	}
	coord.drain_ready();
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn edit_inside_region_then_leave() {
	let (doc, log, mut coord) = setup("$x^2$");

	coord.render_latex(Range::new(Position::new(0, 1), Position::new(0, 4))).unwrap();
	settle(&mut coord, Duration::ZERO).await;
	assert_eq!(coord.last_rendered_text(), Some("x^2"));
	assert_eq!(coord.overlay().surface().calls(), &[OverlayCall::Show(ScreenPoint::new(42, 10))]);

	// Two moves inside the region within one debounce window.
	doc.move_cursor(Position::new(0, 2));
	coord.drain_ready();
	settle(&mut coord, Duration::from_millis(150)).await;
	doc.move_cursor(Position::new(0, 4));
	coord.drain_ready();
	doc.type_text(" + 1");
	coord.drain_ready();
	assert_eq!(log.lock().len(), 1);

	settle(&mut coord, Duration::from_millis(300)).await;
	assert_eq!(*log.lock(), vec!["x^2".to_string(), "x^2 + 1".to_string()]);

	settle(&mut coord, Duration::ZERO).await;
	assert_eq!(coord.last_rendered_text(), Some("x^2 + 1"));
	assert_eq!(coord.active_range(), Some(Range::new(Position::new(0, 1), Position::new(0, 8))));

	// Past the closing delimiter.
	doc.move_cursor(Position::new(0, 9));
	coord.drain_ready();
	assert!(!coord.is_active());
	assert!(!coord.overlay().is_visible());
	assert_eq!(coord.overlay().surface().calls().last(), Some(&OverlayCall::Hide));
	assert_eq!(doc.anchor_count(), 0);

	let stats = coord.stats();
	assert_eq!(stats.renders_dispatched, 2);
	assert_eq!(stats.sessions_ended, 1);
	assert_eq!(stats.stale_completions, 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn invalid_markup_mid_edit_keeps_last_good_render() {
	let (doc, log, mut coord) = setup("see $\\frac12$ here");

	coord.render_latex(Range::new(Position::new(0, 5), Position::new(0, 12))).unwrap();
	settle(&mut coord, Duration::ZERO).await;
	assert_eq!(coord.last_rendered_text(), Some("\\frac12"));

	doc.move_cursor(Position::new(0, 12));
	doc.type_text("{");
	coord.drain_ready();
	settle(&mut coord, Duration::from_millis(300)).await;
	settle(&mut coord, Duration::ZERO).await;

	assert_eq!(log.lock().last().map(String::as_str), Some("\\frac12{"));
	assert_eq!(coord.last_rendered_text(), Some("\\frac12"));
	assert_eq!(coord.stats().typeset_errors, 1);

	doc.type_text("}");
	coord.drain_ready();
	settle(&mut coord, Duration::from_millis(300)).await;
	settle(&mut coord, Duration::ZERO).await;

	assert_eq!(coord.last_rendered_text(), Some("\\frac12{}"));
	assert!(coord.is_active());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn losing_focus_hides_preview() {
	let (doc, _log, mut coord) = setup("$a$ and $b$");
	coord.render_latex(Range::new(Position::new(0, 1), Position::new(0, 2))).unwrap();
	settle(&mut coord, Duration::ZERO).await;

	doc.blur();
	coord.drain_ready();

	assert!(!coord.is_active());
	assert!(!coord.overlay().is_visible());

	// A fresh trigger starts a new session on the other fragment.
	let id = coord.render_latex(Range::new(Position::new(0, 9), Position::new(0, 10))).unwrap();
	assert_eq!(coord.session_id(), Some(id));
	assert!(coord.overlay().is_visible());
}
