use std::ops::Add;

/// A point in screen (page) coordinates, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
	/// Horizontal pixel coordinate.
	pub x: i32,
	/// Vertical pixel coordinate.
	pub y: i32,
}

impl ScreenPoint {
	/// Creates a new screen point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}

	/// Returns this point shifted by `offset`, saturating at the `i32` bounds.
	pub const fn offset_by(self, offset: PixelOffset) -> Self {
		Self {
			x: self.x.saturating_add(offset.x),
			y: self.y.saturating_add(offset.y),
		}
	}
}

impl Add<PixelOffset> for ScreenPoint {
	type Output = ScreenPoint;

	fn add(self, rhs: PixelOffset) -> Self::Output {
		self.offset_by(rhs)
	}
}

/// A signed pixel displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelOffset {
	/// Horizontal displacement.
	pub x: i32,
	/// Vertical displacement.
	pub y: i32,
}

impl PixelOffset {
	/// Creates a new offset.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// Measured size of an overlay, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OverlaySize {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}

impl OverlaySize {
	/// Creates a new size.
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}
}
