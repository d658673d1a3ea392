//! Rope utilities for converting between line/column and character offsets.

use ropey::RopeSlice;

use crate::range::{CharIdx, CharLen, Position};

/// Returns the length of a line in characters, excluding its line break.
pub fn line_len_without_break(text: RopeSlice, line: usize) -> CharLen {
	let slice = text.line(line);
	let len = slice.len_chars();
	let trailing = match (len.checked_sub(2).map(|i| slice.char(i)), len.checked_sub(1).map(|i| slice.char(i))) {
		(Some('\r'), Some('\n')) => 2,
		(_, Some('\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')) => 1,
		_ => 0,
	};
	len - trailing
}

/// Converts a line/column position into a character offset.
///
/// Lines past the end clamp to the end of the text. Columns past the end of
/// a line clamp to the end of that line (before its line break).
pub fn position_to_char(text: RopeSlice, pos: Position) -> CharIdx {
	let last_line = text.len_lines().saturating_sub(1);
	if pos.line > last_line {
		return text.len_chars();
	}
	let column = pos.column.min(line_len_without_break(text, pos.line));
	text.line_to_char(pos.line) + column
}

/// Converts a character offset into a line/column position.
///
/// Offsets past the end clamp to the end of the text.
pub fn char_to_position(text: RopeSlice, idx: CharIdx) -> Position {
	let idx = idx.min(text.len_chars());
	let line = text.char_to_line(idx);
	Position::new(line, idx - text.line_to_char(line))
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_position_to_char_first_and_second_line() {
		let text = Rope::from("hello\nworld\n");
		assert_eq!(position_to_char(text.slice(..), Position::new(0, 3)), 3);
		// "hello\n" = 6 chars, + 2 = 8
		assert_eq!(position_to_char(text.slice(..), Position::new(1, 2)), 8);
	}

	#[test]
	fn test_column_clamps_before_line_break() {
		let text = Rope::from("ab\r\ncd");
		assert_eq!(position_to_char(text.slice(..), Position::new(0, 99)), 2);
		assert_eq!(position_to_char(text.slice(..), Position::new(1, 99)), 6);
	}

	#[test]
	fn test_line_past_end_clamps_to_len() {
		let text = Rope::from("x^2");
		assert_eq!(position_to_char(text.slice(..), Position::new(4, 0)), 3);
	}

	#[test]
	fn test_char_to_position() {
		let text = Rope::from("a\u{1F600}b\nc");
		assert_eq!(char_to_position(text.slice(..), 2), Position::new(0, 2));
		assert_eq!(char_to_position(text.slice(..), 4), Position::new(1, 0));
		assert_eq!(char_to_position(text.slice(..), 40), Position::new(1, 1));
	}

	#[test]
	fn test_trailing_newline_has_empty_last_line() {
		let text = Rope::from("hello\n");
		assert_eq!(char_to_position(text.slice(..), 6), Position::new(1, 0));
		assert_eq!(position_to_char(text.slice(..), Position::new(1, 0)), 6);
		assert_eq!(line_len_without_break(text.slice(..), 0), 5);
	}
}
