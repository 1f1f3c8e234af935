use async_trait::async_trait;
use xeno_primitives::{Document, Url, WorkspaceEdit};

use crate::error::ApplyError;

/// Undo-group code attached to rename edits.
pub const RENAME_UNDO_GROUP: &str = "undoredo.rename";

/// Describes who is applying an edit and how it should be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyContext {
	/// Document of the editor the edit originates from.
	pub url: Url,
	/// Human-readable label for undo history.
	pub label: String,
	/// Undo-group code.
	pub undo_group: &'static str,
}

impl ApplyContext {
	pub fn rename(url: Url, old_name: &str, new_name: &str) -> Self {
		Self {
			url,
			label: format!("Renaming '{old_name}' to '{new_name}'"),
			undo_group: RENAME_UNDO_GROUP,
		}
	}
}

/// Result of a successful application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyResult {
	pub applied_edits: usize,
	pub touched_documents: usize,
	/// Summary suitable for a screen-reader announcement.
	pub aria_summary: Option<String>,
}

/// Applies workspace edits all-or-nothing.
#[async_trait(?Send)]
pub trait BulkEditApplier {
	/// Applies every edit in `edit` or none of them.
	async fn apply(&self, edit: &WorkspaceEdit, context: &ApplyContext) -> Result<ApplyResult, ApplyError>;
}

/// Lookup of documents by identity, for headless callers.
pub trait DocumentStore {
	fn document(&self, url: &Url) -> Option<Document>;
}
