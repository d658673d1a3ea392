//! Counters describing what a coordinator has done.
//!
//! The coordinator owns its stats and updates them on its own thread, so plain
//! integers suffice. Snapshots are cheap copies for debug displays and tests.

/// Lifetime counters for one [`RenderCoordinator`](crate::RenderCoordinator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStats {
	/// Sessions created by `render_latex`.
	pub sessions_started: u64,
	/// Sessions torn down (replaced, dismissed, cursor exit or blur).
	pub sessions_ended: u64,
	/// Typeset requests handed to the engine.
	pub renders_dispatched: u64,
	/// Debounce firings skipped because the text matched the last good render.
	pub renders_suppressed: u64,
	/// Completions that reported a typeset error.
	pub typeset_errors: u64,
	/// Completions that arrived for a session that no longer exists.
	pub stale_completions: u64,
}
