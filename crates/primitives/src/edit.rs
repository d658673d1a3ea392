use crate::range::{CharIdx, CharLen};

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// A single replace operation: `deleted` characters at `at` are replaced by
/// `inserted` characters.
///
/// Pure insertions have `deleted == 0`, pure deletions have `inserted == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
	/// Character offset where the edit begins.
	pub at: CharIdx,
	/// Number of characters removed starting at `at`.
	pub deleted: CharLen,
	/// Number of characters inserted at `at`.
	pub inserted: CharLen,
}

impl TextEdit {
	/// Creates an insertion of `len` characters at `at`.
	pub const fn insert(at: CharIdx, len: CharLen) -> Self {
		Self {
			at,
			deleted: 0,
			inserted: len,
		}
	}

	/// Creates a deletion of `len` characters at `at`.
	pub const fn delete(at: CharIdx, len: CharLen) -> Self {
		Self {
			at,
			deleted: len,
			inserted: 0,
		}
	}

	/// Creates a replacement of `deleted` characters by `inserted` characters.
	pub const fn replace(at: CharIdx, deleted: CharLen, inserted: CharLen) -> Self {
		Self { at, deleted, inserted }
	}

	/// Maps a position through this edit using the specified bias.
	///
	/// Positions before the edit are unchanged. Positions strictly inside the
	/// deleted span collapse onto the start of the inserted text. Positions
	/// after the deleted span shift by the net length change. A position exactly
	/// at `at` moves past the inserted text only with [`Bias::Right`].
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		if pos < self.at {
			return pos;
		}

		if pos == self.at {
			return match bias {
				Bias::Left => pos,
				Bias::Right if self.deleted == 0 => pos + self.inserted,
				Bias::Right => pos,
			};
		}

		let deleted_end = self.at + self.deleted;
		if pos < deleted_end {
			return self.at;
		}

		pos - self.deleted + self.inserted
	}
}
