use std::fmt;

/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A document position in line/column coordinates.
///
/// Both fields are zero-based. Columns count characters within the line.
/// Ordering is line-major, so `(1, 0)` sorts after `(0, 80)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based character offset in the line.
	pub column: usize,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// A document range between two positions.
///
/// Containment is closed: both `start` and `end` count as inside the range.
/// A range with `start == end` is degenerate but legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
	/// First position of the range.
	pub start: Position,
	/// Last position of the range.
	pub end: Position,
}

impl Range {
	/// Creates a new range from start to end.
	pub const fn new(start: Position, end: Position) -> Self {
		Self { start, end }
	}

	/// Creates a zero-width range at the given position.
	pub const fn point(pos: Position) -> Self {
		Self::new(pos, pos)
	}

	/// Returns true if start equals end.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if the start sorts after the end.
	#[inline]
	pub fn is_inverted(&self) -> bool {
		self.start > self.end
	}

	/// Returns true if the position lies within the range, edges included.
	pub fn contains(&self, pos: Position) -> bool {
		self.start <= pos && pos <= self.end
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..={}", self.start, self.end)
	}
}
