//! Single-shot, restartable debounce timer.
//!
//! [`DebounceScheduler`] arms one tokio countdown at a time. Re-arming cancels
//! the previous countdown through its [`CancellationToken`] and bumps the
//! generation, so a countdown whose message was already queued before the
//! re-arm is still rejected by [`claim`](DebounceScheduler::claim). The elapsed
//! notification is delivered as a message on the owner's channel; the owner
//! claims it on its own thread, so firing never runs concurrently with the
//! rest of the state machine.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Proof that a particular arming elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
	generation: u64,
}

impl DebounceTicket {
	/// Returns the arming generation this ticket belongs to.
	pub const fn generation(&self) -> u64 {
		self.generation
	}
}

#[derive(Debug)]
struct Arming {
	generation: u64,
	cancel: CancellationToken,
}

/// Last-call-wins debounce timer that reports through an mpsc channel.
#[derive(Debug)]
pub struct DebounceScheduler<E> {
	tx: mpsc::UnboundedSender<E>,
	generation: u64,
	armed: Option<Arming>,
}

impl<E: Send + 'static> DebounceScheduler<E> {
	/// Creates an idle scheduler that delivers elapsed events on `tx`.
	pub fn new(tx: mpsc::UnboundedSender<E>) -> Self {
		Self {
			tx,
			generation: 0,
			armed: None,
		}
	}

	/// Arms a countdown of `delay`, superseding any pending one.
	///
	/// When the countdown elapses uncancelled, `to_event(ticket)` is sent on the
	/// channel. Must be called from within a tokio runtime.
	pub fn schedule<F>(&mut self, delay: Duration, to_event: F) -> DebounceTicket
	where
		F: FnOnce(DebounceTicket) -> E + Send + 'static,
	{
		self.cancel();
		self.generation = self.generation.wrapping_add(1);
		let ticket = DebounceTicket {
			generation: self.generation,
		};
		let cancel = CancellationToken::new();
		self.armed = Some(Arming {
			generation: self.generation,
			cancel: cancel.clone(),
		});

		let tx = self.tx.clone();
		tokio::spawn(async move {
			tokio::select! {
				_ = cancel.cancelled() => return,
				_ = sleep(delay) => {}
			}
			let _ = tx.send(to_event(ticket));
		});

		trace!(generation = ticket.generation, delay_ms = delay.as_millis() as u64, "debounce.schedule");
		ticket
	}

	/// Cancels the pending countdown, if any.
	pub fn cancel(&mut self) {
		if let Some(armed) = self.armed.take() {
			armed.cancel.cancel();
			trace!(generation = armed.generation, "debounce.cancel");
		}
	}

	/// Accepts an elapsed ticket.
	///
	/// Returns true only for the ticket of the current arming, and only once;
	/// the scheduler is idle afterwards. Superseded or cancelled tickets return
	/// false.
	pub fn claim(&mut self, ticket: DebounceTicket) -> bool {
		match &self.armed {
			Some(armed) if armed.generation == ticket.generation => {
				self.armed = None;
				true
			}
			_ => {
				trace!(generation = ticket.generation, "debounce.stale_ticket");
				false
			}
		}
	}

	/// Returns true while a countdown is pending.
	pub fn is_armed(&self) -> bool {
		self.armed.is_some()
	}
}

impl<E> Drop for DebounceScheduler<E> {
	fn drop(&mut self) {
		if let Some(armed) = self.armed.take() {
			armed.cancel.cancel();
		}
	}
}
