use std::cell::Cell;
use std::ops::Range as CharRange;

use tracing::debug;
use xeno_primitives::{Position, Range, Url};

use crate::provider::RenameLocation;

/// Lifecycle of one rename session.
///
/// `AwaitingInput` is the only state in which the rename input is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
	#[default]
	Idle,
	Locating,
	AwaitingInput,
	Resolving,
	Applying,
	Done,
	Rejected,
	Cancelled,
	Errored,
}

impl SessionState {
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Done | Self::Rejected | Self::Cancelled | Self::Errored)
	}

	/// True while a session is in progress.
	pub fn is_active(self) -> bool {
		!self.is_terminal() && self != Self::Idle
	}
}

/// Why a session ended before showing the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// No provider applies to the document.
	NoProvider,
	/// The document cannot be edited.
	ReadOnly,
	/// Nothing renameable at the cursor.
	NoLocation,
	/// The cursor or content changed while the location was resolved.
	Stale,
	/// Another session is still running on this editor.
	Busy,
}

/// Where a rejection was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionSurface {
	/// Inline at the cursor; the editor was unchanged.
	Inline,
	/// Passive notification; the editor moved on meanwhile.
	Notification,
}

/// How a session ended, for sessions that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
	Skipped(SkipReason),
	/// Location resolution failed or was refused; the message was shown inline.
	LocationFailed(String),
	Cancelled,
	Renamed { summary: Option<String> },
	Rejected { reason: String, surface: RejectionSurface },
}

/// The record of one rename attempt.
#[derive(Debug, Clone)]
pub(super) struct RenameSession {
	pub url: Url,
	pub position: Position,
	pub location: RenameLocation,
	pub new_name: Option<String>,
}

impl RenameSession {
	pub fn new(url: Url, position: Position, location: RenameLocation) -> Self {
		Self {
			url,
			position,
			location,
			new_name: None,
		}
	}

	pub fn old_name(&self) -> &str {
		&self.location.text
	}

	/// The position providers rename from: the start of the resolved symbol,
	/// not the live cursor.
	pub fn anchor(&self) -> Position {
		self.location.range.start
	}
}

/// Char offsets into the symbol text to pre-select in the input.
///
/// A non-empty, single-line editor selection inside the symbol is carried
/// over; anything else selects the whole symbol.
pub fn prefill_selection(location: &RenameLocation, selection: Range) -> CharRange<usize> {
	let whole = 0..location.text.chars().count();
	let range = location.range;
	if selection.is_empty() || !selection.is_single_line() || selection.start.line != range.start.line || !range.contains_range(&selection) {
		return whole;
	}
	let start = (selection.start.column - range.start.column) as usize;
	let end = (selection.end.column - range.start.column) as usize;
	start.min(whole.end)..end.min(whole.end)
}

/// Owns the session state cell for the duration of one session.
///
/// Dropping the guard while the session is still active (the caller
/// abandoned the future) ends it as cancelled, so the input-visible state
/// never outlives the session.
pub(super) struct SessionGuard<'a> {
	state: &'a Cell<SessionState>,
}

impl<'a> SessionGuard<'a> {
	pub fn begin(state: &'a Cell<SessionState>) -> Self {
		let guard = Self { state };
		guard.transition(SessionState::Locating);
		guard
	}

	pub fn transition(&self, next: SessionState) {
		let prev = self.state.replace(next);
		debug!(?prev, ?next, "rename session transition");
	}
}

impl Drop for SessionGuard<'_> {
	fn drop(&mut self) {
		if self.state.get().is_active() {
			self.transition(SessionState::Cancelled);
		}
	}
}
