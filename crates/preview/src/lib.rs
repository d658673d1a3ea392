#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Live inline preview of math markup embedded in an edited document.
//!
//! The crate decides *when* and *with what text* an external typesetting engine
//! runs, and how to react to its outcome. The document, the floating overlay
//! and the engine are host components reached through traits.
//!
//! # Main Types
//!
//! - [`RenderCoordinator`] - session state machine: anchoring, debouncing,
//!   dispatch and completion reconciliation
//! - [`AnchoredRegion`] - document range that follows edits
//! - [`DebounceScheduler`] - last-call-wins single-shot timer
//! - [`OverlayPresenter`] - façade over the host's [`OverlaySurface`]
//! - [`TypesetEngine`] - contract for the external renderer
//!
//! # Example
//!
//! ```no_run
//! use mathpeek_preview::memory::{MemoryDocument, RecordingOverlay};
//! use mathpeek_preview::{BoxFutureStatic, FnTypesetEngine, PreviewConfig, RenderCoordinator, TypesetOutcome};
//! use mathpeek_primitives::{Position, Range};
//!
//! # async fn demo() -> mathpeek_preview::Result<()> {
//! let doc = MemoryDocument::new("let $x^2$ be");
//! let engine = FnTypesetEngine::new(|_surface, text| -> BoxFutureStatic<TypesetOutcome> {
//!     Box::pin(async move { TypesetOutcome::success(text) })
//! });
//! let mut preview = RenderCoordinator::new(doc.clone(), RecordingOverlay::default(), engine, PreviewConfig::default());
//!
//! preview.render_latex(Range::new(Position::new(0, 5), Position::new(0, 8)))?;
//! doc.move_cursor(Position::new(0, 6));
//! preview.process_next().await;
//! # Ok(())
//! # }
//! ```

/// Preview configuration.
pub mod config;
/// Session state machine.
pub mod coordinator;
/// Restartable debounce timer.
pub mod debounce;
/// Document surface contract and handler subscriptions.
pub mod document;
/// Typesetting engine contract.
pub mod engine;
/// Error types.
pub mod error;
/// Coordinator event channel.
pub mod event;
/// In-memory document and overlay implementations.
pub mod memory;
/// Overlay contract and façade.
pub mod overlay;
/// Anchored region contract.
pub mod region;
/// Lifetime counters.
pub mod stats;

pub use config::PreviewConfig;
pub use coordinator::{RenderCoordinator, RenderPlacement, RenderRequest};
pub use debounce::{DebounceScheduler, DebounceTicket};
pub use document::{BlurHandler, CursorHandler, DocumentSurface, Subscription};
pub use engine::{BoxFutureStatic, FnTypesetEngine, TypesetEngine, TypesetOutcome};
pub use error::{ConfigError, PreviewError, Result, TypesetError};
pub use event::{EventSender, PreviewEvent, SessionId};
pub use overlay::{OverlayPresenter, OverlaySurface, SurfaceId};
pub use region::AnchoredRegion;
pub use stats::PreviewStats;
