use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in a document, one-based in both line and column.
///
/// Columns count characters, not bytes. A column of `n` sits between the
/// `n - 1`th and `n`th character of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
	/// One-based line number.
	pub line: u32,
	/// One-based column number.
	pub column: u32,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// A span between two positions in one document.
///
/// `start <= end` always holds; [`Range::new`] orders its arguments.
/// The end is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
	/// Start position (inclusive).
	pub start: Position,
	/// End position (exclusive).
	pub end: Position,
}

impl Range {
	/// Creates a range, swapping the endpoints if they are reversed.
	pub fn new(a: Position, b: Position) -> Self {
		if a <= b { Self { start: a, end: b } } else { Self { start: b, end: a } }
	}

	/// Creates a zero-width range at a position.
	pub const fn point(pos: Position) -> Self {
		Self { start: pos, end: pos }
	}

	/// Shorthand for a range on a single line, `[start_col, end_col)`.
	pub fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
		Self::new(Position::new(line, start_col), Position::new(line, end_col))
	}

	/// Returns true if the range is zero-width.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if both endpoints are on the same line.
	#[inline]
	pub fn is_single_line(&self) -> bool {
		self.start.line == self.end.line
	}

	/// Returns true if `other` is fully inside this range.
	pub fn contains_range(&self, other: &Range) -> bool {
		self.start <= other.start && other.end <= self.end
	}

	/// Returns true if the two ranges share at least one character.
	///
	/// Zero-width ranges hold no characters and never overlap.
	pub fn overlaps(&self, other: &Range) -> bool {
		!self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}
