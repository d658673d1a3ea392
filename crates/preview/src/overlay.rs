//! Floating overlay presentation.
//!
//! [`OverlaySurface`] is the contract implemented by the host's popup
//! component. [`OverlayPresenter`] is the thin façade the coordinator drives:
//! it applies the placement offset and tracks visibility so repeated hides
//! stay cheap.

use mathpeek_primitives::{OverlaySize, PixelOffset, ScreenPoint};
use tracing::trace;

/// Opaque handle to the surface an engine renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Host-side floating popup.
pub trait OverlaySurface {
	/// Measures the overlay, asks `place` where to put it, then shows it there.
	///
	/// `place` receives the measured size and returns the top-left corner. It
	/// runs before this call returns; the result is applied as if by
	/// [`set_position`](Self::set_position).
	fn set_position_and_show(&mut self, place: &mut dyn FnMut(OverlaySize) -> ScreenPoint);

	/// Moves the overlay without changing its visibility.
	fn set_position(&mut self, at: ScreenPoint);

	/// Hides the overlay.
	fn hide(&mut self);

	/// Returns the handle of the content surface engines render into.
	fn content_surface(&self) -> SurfaceId;
}

/// Façade over an [`OverlaySurface`].
#[derive(Debug)]
pub struct OverlayPresenter<O> {
	surface: O,
	visible: bool,
	placed_at: Option<ScreenPoint>,
}

impl<O: OverlaySurface> OverlayPresenter<O> {
	/// Wraps a hidden surface.
	pub fn new(surface: O) -> Self {
		Self {
			surface,
			visible: false,
			placed_at: None,
		}
	}

	/// Shows the overlay at `anchor + offset` and returns the applied point.
	pub fn show_at(&mut self, anchor: ScreenPoint, offset: PixelOffset) -> ScreenPoint {
		let target = anchor.offset_by(offset);
		self.surface.set_position_and_show(&mut |size| {
			trace!(width = size.width, height = size.height, x = target.x, y = target.y, "overlay.place");
			target
		});
		self.visible = true;
		self.placed_at = Some(target);
		target
	}

	/// Moves the overlay.
	pub fn set_position(&mut self, at: ScreenPoint) {
		self.surface.set_position(at);
		self.placed_at = Some(at);
	}

	/// Hides the overlay if it is visible. Returns true if it was.
	pub fn hide(&mut self) -> bool {
		if !self.visible {
			return false;
		}
		self.surface.hide();
		self.visible = false;
		true
	}

	/// Returns the surface engines render into.
	pub fn content_surface(&self) -> SurfaceId {
		self.surface.content_surface()
	}

	/// Returns true while the overlay is shown.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Returns the last position applied to the overlay.
	pub fn placed_at(&self) -> Option<ScreenPoint> {
		self.placed_at
	}

	/// Returns the wrapped surface.
	pub fn surface(&self) -> &O {
		&self.surface
	}
}
