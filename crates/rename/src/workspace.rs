//! In-memory document store with atomic workspace edit application.
//!
//! Application is plan-then-commit: every resource edit is validated against
//! a scratch copy of its document before any stored document is replaced, so
//! a rejected edit leaves the workspace exactly as it was.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};
use xeno_primitives::{Document, TextEdit, Url, WorkspaceEdit};

use crate::apply::{ApplyContext, ApplyResult, BulkEditApplier, DocumentStore};
use crate::error::ApplyError;

/// Open documents keyed by URL.
#[derive(Default)]
pub struct Workspace {
	documents: RefCell<HashMap<Url, Document>>,
}

impl Workspace {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a document.
	pub fn open(&self, document: Document) {
		self.documents.borrow_mut().insert(document.url().clone(), document);
	}

	pub fn get(&self, url: &Url) -> Option<Document> {
		self.documents.borrow().get(url).cloned()
	}

	/// Applies edits to a single document, as typing would.
	pub fn edit_document(&self, url: &Url, edits: &[TextEdit]) -> Result<(), ApplyError> {
		let mut documents = self.documents.borrow_mut();
		let document = documents.get_mut(url).ok_or_else(|| ApplyError::UnknownDocument(url.to_string()))?;
		document.apply(edits).map_err(|source| ApplyError::Edit {
			url: url.to_string(),
			source,
		})
	}

	/// Validates `edit` and returns the updated documents without storing them.
	fn plan(&self, edit: &WorkspaceEdit) -> Result<Vec<Document>, ApplyError> {
		let resources = edit.edits.as_ref().ok_or(ApplyError::NoEdits)?;

		let mut per_url: Vec<(Url, Option<u64>, Vec<TextEdit>)> = Vec::new();
		for resource in resources {
			match per_url.iter_mut().find(|(url, ..)| *url == resource.url) {
				Some((_, version, edits)) => {
					*version = version.or(resource.version);
					edits.extend(resource.edits.iter().cloned());
				}
				None => per_url.push((resource.url.clone(), resource.version, resource.edits.clone())),
			}
		}

		let documents = self.documents.borrow();
		let mut planned = Vec::with_capacity(per_url.len());
		for (url, version, edits) in per_url {
			let mut document = documents.get(&url).cloned().ok_or_else(|| ApplyError::UnknownDocument(url.to_string()))?;
			if let Some(expected) = version
				&& expected != document.version()
			{
				return Err(ApplyError::VersionMismatch {
					url: url.to_string(),
					expected,
					actual: document.version(),
				});
			}
			document.apply(&edits).map_err(|source| ApplyError::Edit {
				url: url.to_string(),
				source,
			})?;
			planned.push(document);
		}
		Ok(planned)
	}
}

impl DocumentStore for Workspace {
	fn document(&self, url: &Url) -> Option<Document> {
		self.get(url)
	}
}

#[async_trait(?Send)]
impl BulkEditApplier for Workspace {
	async fn apply(&self, edit: &WorkspaceEdit, context: &ApplyContext) -> Result<ApplyResult, ApplyError> {
		let planned = self.plan(edit).inspect_err(|err| {
			warn!(label = %context.label, error = %err, "workspace edit rejected");
		})?;

		let applied_edits = edit.text_edit_count();
		let touched_documents = planned.len();
		let mut documents = self.documents.borrow_mut();
		for document in planned {
			documents.insert(document.url().clone(), document);
		}
		debug!(label = %context.label, group = context.undo_group, applied_edits, touched_documents, "applied workspace edit");

		Ok(ApplyResult {
			applied_edits,
			touched_documents,
			aria_summary: Some(summary(applied_edits, touched_documents)),
		})
	}
}

fn summary(edits: usize, documents: usize) -> String {
	match (edits, documents) {
		(0, _) => "Made no edits".to_string(),
		(n, 1) => format!("Made {n} text edits in one file"),
		(n, m) => format!("Made {n} text edits in {m} files"),
	}
}

#[cfg(test)]
mod tests {
	use xeno_primitives::{EditError, Range, ResourceEdit};

	use super::*;

	fn url(name: &str) -> Url {
		Url::parse(&format!("file:///project/{name}")).unwrap()
	}

	fn workspace() -> Workspace {
		let workspace = Workspace::new();
		workspace.open(Document::new(url("a.rs"), "rust", "fn foo() {}\nfoo();\n"));
		workspace.open(Document::new(url("b.rs"), "rust", "use a::foo;\n"));
		workspace
	}

	fn context() -> ApplyContext {
		ApplyContext::rename(url("a.rs"), "foo", "bar")
	}

	fn text(workspace: &Workspace, name: &str) -> String {
		workspace.get(&url(name)).unwrap().text().to_string()
	}

	#[tokio::test]
	async fn applies_across_documents() {
		let workspace = workspace();
		let edit = WorkspaceEdit::new(vec![
			ResourceEdit::new(
				url("a.rs"),
				vec![TextEdit::new(Range::on_line(1, 4, 7), "bar"), TextEdit::new(Range::on_line(2, 1, 4), "bar")],
			),
			ResourceEdit::new(url("b.rs"), vec![TextEdit::new(Range::on_line(1, 8, 11), "bar")]).at_version(1),
		]);

		let result = workspace.apply(&edit, &context()).await.unwrap();

		assert_eq!(text(&workspace, "a.rs"), "fn bar() {}\nbar();\n");
		assert_eq!(text(&workspace, "b.rs"), "use a::bar;\n");
		assert_eq!(result.applied_edits, 3);
		assert_eq!(result.touched_documents, 2);
		assert_eq!(result.aria_summary.as_deref(), Some("Made 3 text edits in 2 files"));
		assert_eq!(workspace.get(&url("a.rs")).unwrap().version(), 2);
	}

	#[tokio::test]
	async fn stale_version_leaves_every_document_untouched() {
		let workspace = workspace();
		let edit = WorkspaceEdit::new(vec![
			ResourceEdit::new(url("a.rs"), vec![TextEdit::new(Range::on_line(1, 4, 7), "bar")]),
			ResourceEdit::new(url("b.rs"), vec![TextEdit::new(Range::on_line(1, 8, 11), "bar")]).at_version(7),
		]);

		let err = workspace.apply(&edit, &context()).await.unwrap_err();

		assert!(matches!(err, ApplyError::VersionMismatch { expected: 7, actual: 1, .. }), "got {err:?}");
		assert_eq!(text(&workspace, "a.rs"), "fn foo() {}\nfoo();\n");
	}

	#[tokio::test]
	async fn invalid_range_and_unknown_document_are_rejected() {
		let workspace = workspace();
		let out_of_bounds = WorkspaceEdit::new(vec![ResourceEdit::new(url("a.rs"), vec![TextEdit::new(Range::on_line(9, 1, 2), "x")])]);
		let err = workspace.apply(&out_of_bounds, &context()).await.unwrap_err();
		assert!(matches!(err, ApplyError::Edit { source: EditError::OutOfBounds(_), .. }));

		let unknown = WorkspaceEdit::new(vec![ResourceEdit::new(url("missing.rs"), Vec::new())]);
		let err = workspace.apply(&unknown, &context()).await.unwrap_err();
		assert_eq!(err, ApplyError::UnknownDocument(url("missing.rs").to_string()));

		let err = workspace.apply(&WorkspaceEdit::rejected("no"), &context()).await.unwrap_err();
		assert_eq!(err, ApplyError::NoEdits);
	}

	#[tokio::test]
	async fn edits_for_same_document_are_merged() {
		let workspace = workspace();
		let edit = WorkspaceEdit::new(vec![
			ResourceEdit::new(url("a.rs"), vec![TextEdit::new(Range::on_line(1, 4, 7), "bar")]),
			ResourceEdit::new(url("a.rs"), vec![TextEdit::new(Range::on_line(2, 1, 4), "bar")]),
		]);

		let result = workspace.apply(&edit, &context()).await.unwrap();
		assert_eq!(text(&workspace, "a.rs"), "fn bar() {}\nbar();\n");
		assert_eq!(result.aria_summary.as_deref(), Some("Made 2 text edits in one file"));
		assert_eq!(workspace.get(&url("a.rs")).unwrap().version(), 2);
	}

	#[test]
	fn context_labels_rename() {
		let context = context();
		assert_eq!(context.label, "Renaming 'foo' to 'bar'");
		assert_eq!(context.undo_group, "undoredo.rename");
	}
}
