//! Render-lifecycle controller for the live math preview.
//!
//! [`RenderCoordinator`] owns at most one preview session. A session starts
//! with [`RenderCoordinator::render_latex`], which anchors a region in the
//! document, subscribes to cursor moves, and immediately typesets the region
//! into a freshly placed overlay.
//!
//! # Event flow
//!
//! Everything asynchronous reaches the coordinator as a [`PreviewEvent`] on
//! one unbounded channel: cursor moves, focus loss, debounce expiry and typeset
//! completions. The host drives the channel with [`process_next`],
//! [`drain_ready`] or [`run`]; each event is handled to completion before the
//! next one, so no transition interleaves with another.
//!
//! # Staleness
//!
//! Cursor events and typeset completions carry the [`SessionId`] that produced
//! them and are ignored once that session is gone. In-flight renders are never
//! cancelled; their completions simply stop updating state. Debounce expiry is
//! guarded by generation tickets, so a superseded countdown never fires.
//!
//! # Failure
//!
//! A completion that reports an error leaves the last good text unchanged. The
//! engine restores its own output; nothing is retried. The next cursor move
//! naturally produces the next attempt.
//!
//! [`process_next`]: RenderCoordinator::process_next
//! [`drain_ready`]: RenderCoordinator::drain_ready
//! [`run`]: RenderCoordinator::run

mod session;

use std::sync::Arc;

use mathpeek_primitives::{Position, Range, ScreenPoint};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

pub use self::session::{RenderPlacement, RenderRequest};
use self::session::RenderSession;
use crate::config::PreviewConfig;
use crate::debounce::{DebounceScheduler, DebounceTicket};
use crate::document::{DocumentSurface, Subscription};
use crate::engine::{TypesetEngine, TypesetOutcome};
use crate::error::{PreviewError, Result};
use crate::event::{EventReceiver, EventSender, PreviewEvent, SessionId};
use crate::overlay::{OverlayPresenter, OverlaySurface};
use crate::region::AnchoredRegion;
use crate::stats::PreviewStats;

/// Drives one live preview over a document.
///
/// All methods must run inside a tokio runtime: renders and debounce
/// countdowns are spawned as tasks that report back through the event channel.
pub struct RenderCoordinator<D: DocumentSurface, O> {
	document: D,
	overlay: OverlayPresenter<O>,
	engine: Arc<dyn TypesetEngine>,
	config: PreviewConfig,
	debounce: DebounceScheduler<PreviewEvent>,
	session: Option<RenderSession<D::Region>>,
	next_session: u64,
	tx: EventSender,
	rx: EventReceiver,
	_blur: Subscription,
	stats: PreviewStats,
}

impl<D, O> RenderCoordinator<D, O>
where
	D: DocumentSurface,
	O: OverlaySurface,
{
	/// Creates an idle coordinator subscribed to focus loss.
	pub fn new(mut document: D, overlay: O, engine: impl TypesetEngine, config: PreviewConfig) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		let blur_tx = tx.clone();
		let blur = document.subscribe_blur(Box::new(move || {
			let _ = blur_tx.send(PreviewEvent::Blur);
		}));

		Self {
			document,
			overlay: OverlayPresenter::new(overlay),
			engine: Arc::new(engine),
			config,
			debounce: DebounceScheduler::new(tx.clone()),
			session: None,
			next_session: 0,
			tx,
			rx,
			_blur: blur,
			stats: PreviewStats::default(),
		}
	}

	/// Starts a preview session over `range`, replacing any active session.
	///
	/// The overlay is placed next to the end of `range` and the range's text
	/// is typeset immediately.
	pub fn render_latex(&mut self, range: Range) -> Result<SessionId> {
		if range.is_inverted() {
			return Err(PreviewError::InvertedRange(range));
		}

		if let Some(previous) = self.reset_session() {
			debug!(session = %previous, "preview.session.replaced");
		}

		let anchor = self.document.position_to_screen(range.end);
		let region = self.document.create_anchored_region(range.start, range.end);
		self.next_session += 1;
		let id = SessionId(self.next_session);

		let tx = self.tx.clone();
		let cursor_subscription = self.document.subscribe_cursor_moved(Box::new(move |position| {
			let _ = tx.send(PreviewEvent::CursorMoved { session: id, position });
		}));

		let text = self.document.text_for_range(range);
		self.session = Some(RenderSession::new(id, region, cursor_subscription, anchor));
		self.stats.sessions_started += 1;
		debug!(session = %id, range = %range, x = anchor.x, y = anchor.y, "preview.session.start");

		self.dispatch(id, RenderRequest::position_popup(text, anchor));
		Ok(id)
	}

	/// Hides the overlay and ends the active session. Safe to call when idle.
	pub fn dismiss(&mut self) {
		let hidden = self.overlay.hide();
		let ended = self.reset_session();
		if hidden || ended.is_some() {
			debug!(session = ?ended, hidden, "preview.dismiss");
		}
	}

	/// Applies one event to the state machine.
	pub fn handle_event(&mut self, event: PreviewEvent) {
		match event {
			PreviewEvent::CursorMoved { session, position } => self.on_cursor_moved(session, position),
			PreviewEvent::Blur => self.on_blur(),
			PreviewEvent::DebounceElapsed(ticket) => self.on_debounce_elapsed(ticket),
			PreviewEvent::TypesetCompleted { session, outcome } => self.on_typeset_completed(session, outcome),
		}
	}

	/// Waits for the next event and handles it.
	///
	/// Returns false if the channel closed, which cannot happen while the
	/// coordinator holds its own sender.
	pub async fn process_next(&mut self) -> bool {
		match self.rx.recv().await {
			Some(event) => {
				self.handle_event(event);
				true
			}
			None => false,
		}
	}

	/// Handles every event that is already queued, without waiting.
	///
	/// Returns the number of events handled.
	pub fn drain_ready(&mut self) -> usize {
		let mut handled = 0;
		while let Ok(event) = self.rx.try_recv() {
			self.handle_event(event);
			handled += 1;
		}
		handled
	}

	/// Handles events until `shutdown` is cancelled, then dismisses the preview.
	pub async fn run(&mut self, shutdown: CancellationToken) {
		loop {
			tokio::select! {
				_ = shutdown.cancelled() => break,
				event = self.rx.recv() => match event {
					Some(event) => self.handle_event(event),
					None => break,
				},
			}
		}
		self.dismiss();
	}

	/// Returns a sender for injecting events from the host.
	pub fn event_sender(&self) -> EventSender {
		self.tx.clone()
	}

	/// Returns true while a session is active.
	pub fn is_active(&self) -> bool {
		self.session.is_some()
	}

	/// Returns the active session's id.
	pub fn session_id(&self) -> Option<SessionId> {
		self.session.as_ref().map(|s| s.id)
	}

	/// Returns the active region's current boundaries.
	pub fn active_range(&self) -> Option<Range> {
		self.session.as_ref().map(|s| s.region.current_range())
	}

	/// Returns the page coordinates captured when the active session started.
	pub fn session_anchor(&self) -> Option<ScreenPoint> {
		self.session.as_ref().map(|s| s.anchor)
	}

	/// Returns the text of the active session's last successful render.
	pub fn last_rendered_text(&self) -> Option<&str> {
		self.session.as_ref().map(|s| s.last_rendered.as_str())
	}

	/// Returns true while a debounce countdown is pending.
	pub fn is_debounce_armed(&self) -> bool {
		self.debounce.is_armed()
	}

	/// Returns a snapshot of the lifetime counters.
	pub fn stats(&self) -> PreviewStats {
		self.stats
	}

	/// Returns the overlay façade.
	pub fn overlay(&self) -> &OverlayPresenter<O> {
		&self.overlay
	}

	fn on_cursor_moved(&mut self, session: SessionId, position: Position) {
		let Some(active) = self.session.as_ref().filter(|s| s.id == session) else {
			trace!(session = %session, "preview.cursor.stale");
			return;
		};

		if !active.region.contains_position(position) {
			debug!(session = %session, position = %position, "preview.cursor.left_region");
			self.dismiss();
			return;
		}

		self.debounce.schedule(self.config.debounce(), PreviewEvent::DebounceElapsed);
	}

	fn on_blur(&mut self) {
		trace!("preview.blur");
		self.dismiss();
	}

	fn on_debounce_elapsed(&mut self, ticket: DebounceTicket) {
		if !self.debounce.claim(ticket) {
			return;
		}

		debug_assert!(self.session.is_some(), "debounce fired without an active session");
		let Some(active) = self.session.as_ref() else {
			return;
		};

		let text = active.region.current_text();
		if text == active.last_rendered {
			self.stats.renders_suppressed += 1;
			trace!(session = %active.id, "preview.render.unchanged");
			return;
		}

		let id = active.id;
		self.dispatch(id, RenderRequest::content_only(text));
	}

	fn on_typeset_completed(&mut self, session: SessionId, outcome: TypesetOutcome) {
		let Some(active) = self.session.as_mut().filter(|s| s.id == session) else {
			self.stats.stale_completions += 1;
			trace!(session = %session, "preview.typeset.stale");
			return;
		};

		match outcome.result {
			Ok(()) => {
				trace!(session = %session, chars = outcome.text.chars().count(), "preview.typeset.ok");
				active.last_rendered = outcome.text;
			}
			Err(error) => {
				self.stats.typeset_errors += 1;
				debug!(session = %session, %error, "preview.typeset.error");
			}
		}
	}

	fn dispatch(&mut self, session: SessionId, request: RenderRequest) {
		if let RenderPlacement::PositionPopup { anchor } = request.placement {
			self.overlay.show_at(anchor, self.config.popup_offset);
		}

		let surface = self.overlay.content_surface();
		trace!(
			session = %session,
			placement = ?request.placement,
			chars = request.text.chars().count(),
			"preview.render.dispatch"
		);
		let render = self.engine.typeset(surface, request.text);
		self.stats.renders_dispatched += 1;

		let tx = self.tx.clone();
		tokio::spawn(async move {
			let outcome = render.await;
			let _ = tx.send(PreviewEvent::TypesetCompleted { session, outcome });
		});
	}
}

impl<D: DocumentSurface, O> RenderCoordinator<D, O> {
	/// Tears down the active session without touching the overlay.
	///
	/// Cancels the debounce, releases the region and removes the cursor
	/// subscription. Returns the id of the session that ended.
	fn reset_session(&mut self) -> Option<SessionId> {
		self.debounce.cancel();
		let session = self.session.take()?;
		let id = session.id;
		session.close();
		self.stats.sessions_ended += 1;
		Some(id)
	}
}

impl<D: DocumentSurface, O> Drop for RenderCoordinator<D, O> {
	fn drop(&mut self) {
		self.reset_session();
	}
}
