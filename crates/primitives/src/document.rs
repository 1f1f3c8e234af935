use std::ops::Range as CharRange;

use ropey::Rope;
use url::Url;

use crate::edit::{EditError, TextEdit};
use crate::range::{Position, Range};
use crate::word::word_range_at;

/// A text document snapshot: identity, language, content, and version.
///
/// Cloning is cheap; the rope shares its nodes. The version increases by one
/// with every successful [`Document::apply`] and is never reused.
#[derive(Debug, Clone)]
pub struct Document {
	url: Url,
	language: String,
	text: Rope,
	version: u64,
	readonly: bool,
}

impl Document {
	/// Creates a writable document at version 1.
	pub fn new(url: Url, language: impl Into<String>, text: &str) -> Self {
		Self {
			url,
			language: language.into(),
			text: Rope::from(text),
			version: 1,
			readonly: false,
		}
	}

	/// Marks the document read-only (or writable again).
	pub fn with_readonly(mut self, readonly: bool) -> Self {
		self.readonly = readonly;
		self
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn text(&self) -> &Rope {
		&self.text
	}

	pub fn version(&self) -> u64 {
		self.version
	}

	pub fn is_readonly(&self) -> bool {
		self.readonly
	}

	/// Converts a one-based position to a char index.
	///
	/// Returns `None` if the line does not exist or the column lies past the
	/// end of the line (the line terminator is not addressable).
	pub fn position_to_char(&self, pos: Position) -> Option<usize> {
		if pos.line == 0 || pos.column == 0 {
			return None;
		}
		let line = (pos.line - 1) as usize;
		if line >= self.text.len_lines() {
			return None;
		}
		let column = (pos.column - 1) as usize;
		if column > self.line_len(line) {
			return None;
		}
		Some(self.text.line_to_char(line) + column)
	}

	/// Converts a char index to a one-based position, clamping to the end of
	/// the document.
	pub fn char_to_position(&self, idx: usize) -> Position {
		let idx = idx.min(self.text.len_chars());
		let line = self.text.char_to_line(idx);
		let column = idx - self.text.line_to_char(line);
		Position::new(line as u32 + 1, column as u32 + 1)
	}

	/// Converts a range to a char range, or `None` if either end is out of bounds.
	pub fn range_to_chars(&self, range: Range) -> Option<CharRange<usize>> {
		Some(self.position_to_char(range.start)?..self.position_to_char(range.end)?)
	}

	/// Returns the text covered by `range`.
	pub fn text_in(&self, range: Range) -> Option<String> {
		let chars = self.range_to_chars(range)?;
		Some(self.text.slice(chars).to_string())
	}

	/// Looks up the word under or immediately before `pos`.
	pub fn word_at(&self, pos: Position) -> Option<(Range, String)> {
		let idx = self.position_to_char(pos)?;
		let chars = word_range_at(self.text.slice(..), idx)?;
		let range = Range::new(self.char_to_position(chars.start), self.char_to_position(chars.end));
		Some((range, self.text.slice(chars).to_string()))
	}

	/// Validates a set of edits against this document without applying them.
	///
	/// Returns the char ranges sorted by start, paired with their replacement.
	pub fn plan(&self, edits: &[TextEdit]) -> Result<Vec<(CharRange<usize>, String)>, EditError> {
		if self.readonly {
			return Err(EditError::ReadOnly(self.url.to_string()));
		}
		let mut planned = Vec::with_capacity(edits.len());
		for edit in edits {
			let chars = self.range_to_chars(edit.range).ok_or(EditError::OutOfBounds(edit.range))?;
			planned.push((edit.range, chars, edit.new_text.clone()));
		}
		planned.sort_by_key(|(_, chars, _)| (chars.start, chars.end));
		for pair in planned.windows(2) {
			if pair[1].1.start < pair[0].1.end {
				return Err(EditError::Overlapping(pair[1].0));
			}
		}
		Ok(planned.into_iter().map(|(_, chars, text)| (chars, text)).collect())
	}

	/// Applies a set of edits atomically. Either every edit lands and the
	/// version is bumped, or the document is left untouched.
	pub fn apply(&mut self, edits: &[TextEdit]) -> Result<(), EditError> {
		let planned = self.plan(edits)?;
		for (chars, text) in planned.into_iter().rev() {
			self.text.remove(chars.clone());
			self.text.insert(chars.start, &text);
		}
		self.version += 1;
		Ok(())
	}

	/// Length of a zero-based line in chars, excluding its terminator.
	fn line_len(&self, line: usize) -> usize {
		let slice = self.text.line(line);
		let mut len = slice.len_chars();
		if len > 0 && slice.char(len - 1) == '\n' {
			len -= 1;
			if len > 0 && slice.char(len - 1) == '\r' {
				len -= 1;
			}
		}
		len
	}
}
