use mathpeek_primitives::ScreenPoint;

use crate::document::Subscription;
use crate::event::SessionId;
use crate::region::AnchoredRegion;

/// How a render should treat the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPlacement {
	/// Session-initiating render: place and show the overlay at `anchor`
	/// (plus the configured offset) before typesetting.
	PositionPopup {
		/// Page coordinates captured for the end of the region.
		anchor: ScreenPoint,
	},
	/// Follow-up render: replace content only.
	ContentOnly,
}

/// One dispatch to the typesetting engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
	/// Text to typeset.
	pub text: String,
	/// Overlay treatment.
	pub placement: RenderPlacement,
}

impl RenderRequest {
	/// Creates a session-initiating request.
	pub fn position_popup(text: String, anchor: ScreenPoint) -> Self {
		Self {
			text,
			placement: RenderPlacement::PositionPopup { anchor },
		}
	}

	/// Creates a content-only request.
	pub fn content_only(text: String) -> Self {
		Self {
			text,
			placement: RenderPlacement::ContentOnly,
		}
	}
}

/// State owned by the active preview session.
#[derive(Debug)]
pub(super) struct RenderSession<R> {
	pub(super) id: SessionId,
	pub(super) region: R,
	cursor_subscription: Subscription,
	pub(super) anchor: ScreenPoint,
	/// Most recently completed successful render; empty until the first one.
	pub(super) last_rendered: String,
}

impl<R: AnchoredRegion> RenderSession<R> {
	pub(super) fn new(id: SessionId, region: R, cursor_subscription: Subscription, anchor: ScreenPoint) -> Self {
		Self {
			id,
			region,
			cursor_subscription,
			anchor,
			last_rendered: String::new(),
		}
	}

	/// Releases the region and removes the cursor subscription.
	pub(super) fn close(mut self) {
		self.region.release();
		self.cursor_subscription.remove();
	}
}
