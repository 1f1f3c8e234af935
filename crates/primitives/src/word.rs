use std::ops::Range as CharRange;

use ropey::RopeSlice;

/// Returns whether a character is a word character (alphanumeric or underscore).
#[inline]
pub fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

/// Finds the start of the word containing or preceding `pos`.
pub fn find_word_start(text: RopeSlice, pos: usize) -> usize {
	let mut start = pos;
	while start > 0 && text.get_char(start - 1).is_some_and(is_word_char) {
		start -= 1;
	}
	start
}

/// Finds the exclusive end of the word starting at or containing `pos`.
pub fn find_word_end(text: RopeSlice, pos: usize) -> usize {
	let mut end = pos;
	while text.get_char(end).is_some_and(is_word_char) {
		end += 1;
	}
	end
}

/// Returns the char range of the word under `pos`, or of the word that ends
/// exactly at `pos` when the cursor sits just past it.
///
/// Words never span lines since newlines are not word characters.
pub fn word_range_at(text: RopeSlice, pos: usize) -> Option<CharRange<usize>> {
	let under = text.get_char(pos).is_some_and(is_word_char);
	let before = pos > 0 && text.get_char(pos - 1).is_some_and(is_word_char);
	if !under && !before {
		return None;
	}
	let start = find_word_start(text, pos);
	let end = find_word_end(text, pos);
	(start < end).then_some(start..end)
}
