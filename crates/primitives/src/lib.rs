//! Core coordinate types for the math preview: document positions, closed
//! ranges, screen geometry, and position mapping through single edits.

/// Position mapping through a single text edit.
pub mod edit;
/// Screen-space points, offsets and sizes.
pub mod geometry;
/// Line/column positions and closed ranges.
pub mod range;
/// Rope coordinate conversions.
pub mod rope;

pub use edit::{Bias, TextEdit};
pub use geometry::{OverlaySize, PixelOffset, ScreenPoint};
pub use range::{CharIdx, CharLen, Position, Range};
pub use rope::{char_to_position, position_to_char};
pub use ropey::{Rope, RopeSlice};
