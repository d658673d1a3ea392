use mathpeek_primitives::{OverlaySize, ScreenPoint};

use crate::overlay::{OverlaySurface, SurfaceId};

/// One call observed by a [`RecordingOverlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCall {
	/// Shown at the given point after measuring.
	Show(ScreenPoint),
	/// Moved to the given point.
	SetPosition(ScreenPoint),
	/// Hidden.
	Hide,
}

/// Headless overlay that records every call it receives.
#[derive(Debug, Clone)]
pub struct RecordingOverlay {
	surface: SurfaceId,
	size: OverlaySize,
	position: Option<ScreenPoint>,
	visible: bool,
	calls: Vec<OverlayCall>,
}

impl RecordingOverlay {
	/// Creates a hidden overlay that reports `size` when measured.
	pub fn new(surface: SurfaceId, size: OverlaySize) -> Self {
		Self {
			surface,
			size,
			position: None,
			visible: false,
			calls: Vec::new(),
		}
	}

	/// Returns every call in order.
	pub fn calls(&self) -> &[OverlayCall] {
		&self.calls
	}

	/// Returns the current top-left corner.
	pub fn position(&self) -> Option<ScreenPoint> {
		self.position
	}

	/// Returns true while shown.
	pub fn is_visible(&self) -> bool {
		self.visible
	}
}

impl Default for RecordingOverlay {
	fn default() -> Self {
		Self::new(SurfaceId(1), OverlaySize::new(160, 48))
	}
}

impl OverlaySurface for RecordingOverlay {
	fn set_position_and_show(&mut self, place: &mut dyn FnMut(OverlaySize) -> ScreenPoint) {
		let at = place(self.size);
		self.position = Some(at);
		self.visible = true;
		self.calls.push(OverlayCall::Show(at));
	}

	fn set_position(&mut self, at: ScreenPoint) {
		self.position = Some(at);
		self.calls.push(OverlayCall::SetPosition(at));
	}

	fn hide(&mut self) {
		self.visible = false;
		self.calls.push(OverlayCall::Hide);
	}

	fn content_surface(&self) -> SurfaceId {
		self.surface
	}
}
