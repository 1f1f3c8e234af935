use xeno_primitives::{Document, Position, Range, Url};

/// Scroll state of an editor viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScrollOffset {
	/// First visible line (one-based, 0 when unknown).
	pub top_line: u32,
	/// First visible column.
	pub left_column: u32,
}

/// The editor a rename session runs in.
///
/// Methods take `&self`: the editor stays live while a session is suspended,
/// so implementations hold their state behind interior mutability.
pub trait EditorView {
	/// Snapshot of the document shown in the editor.
	fn document(&self) -> Document;
	/// Primary cursor position.
	fn cursor(&self) -> Position;
	/// Primary selection. Empty when nothing is selected.
	fn selection(&self) -> Range;
	fn scroll(&self) -> ScrollOffset;
	/// Returns keyboard focus to the text area.
	fn focus(&self);
	/// Shows a transient, dismissible message anchored at `at`.
	fn show_inline_message(&self, at: Position, message: &str);
	/// Shows or hides the busy indicator.
	fn set_progress(&self, visible: bool);
}

/// Non-inline user notifications.
pub trait Notifier {
	/// Passive informational notification.
	fn info(&self, message: &str);
	fn error(&self, message: &str);
	/// Screen-reader announcement.
	fn announce(&self, message: &str);
}

/// Fingerprint of the observable editor state.
///
/// Used only for equality: if the snapshot taken when the user confirmed a
/// name no longer matches the editor, the user has moved on and results are
/// no longer anchored to what they see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorStateSnapshot {
	url: Url,
	position: Position,
	version: u64,
	selection: Range,
	scroll: ScrollOffset,
}

impl EditorStateSnapshot {
	pub fn capture(editor: &dyn EditorView) -> Self {
		let document = editor.document();
		Self {
			url: document.url().clone(),
			position: editor.cursor(),
			version: document.version(),
			selection: editor.selection(),
			scroll: editor.scroll(),
		}
	}

	/// Returns true if every facet still matches the editor.
	pub fn is_current(&self, editor: &dyn EditorView) -> bool {
		*self == Self::capture(editor)
	}

	/// Returns true if the cursor and document content still match, ignoring
	/// selection and scroll.
	pub fn same_position_and_content(&self, editor: &dyn EditorView) -> bool {
		let now = Self::capture(editor);
		self.url == now.url && self.position == now.position && self.version == now.version
	}

	pub fn version(&self) -> u64 {
		self.version
	}
}
