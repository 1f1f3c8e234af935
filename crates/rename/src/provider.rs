use std::rc::Rc;

use async_trait::async_trait;
use xeno_primitives::{Document, Position, Range, WorkspaceEdit};

use crate::error::ProviderError;

/// The span and current text of a renameable symbol.
///
/// `text` equals the document text at `range` when resolved; it may go stale
/// if the document changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameLocation {
	pub range: Range,
	pub text: String,
}

impl RenameLocation {
	pub fn new(range: Range, text: impl Into<String>) -> Self {
		Self { range, text: text.into() }
	}
}

/// A provider's answer to a location request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationReply {
	/// The symbol to rename.
	Location(RenameLocation),
	/// The element at the position cannot be renamed.
	Rejected(String),
}

/// A language-analysis component that can compute rename edits.
#[async_trait(?Send)]
pub trait RenameProvider {
	/// Short label used in logs.
	fn name(&self) -> &str;

	/// Whether [`RenameProvider::resolve_location`] is implemented.
	fn can_resolve_location(&self) -> bool {
		false
	}

	/// Resolves the span of the symbol at `position`.
	///
	/// `Ok(None)` defers to the document's word-boundary lookup.
	async fn resolve_location(&self, _document: &Document, _position: Position) -> Result<Option<LocationReply>, ProviderError> {
		Ok(None)
	}

	/// Computes the edits renaming the symbol at `position` to `new_name`.
	///
	/// `Ok(None)` and an edit carrying a reject reason both hand over to the
	/// next provider in the chain.
	async fn provide_edits(&self, document: &Document, position: Position, new_name: &str) -> Result<Option<WorkspaceEdit>, ProviderError>;
}

/// Providers applicable to one document, in priority order.
///
/// An owned snapshot: registry changes after construction do not affect it.
#[derive(Clone, Default)]
pub struct ProviderChain {
	providers: Vec<Rc<dyn RenameProvider>>,
}

impl ProviderChain {
	pub fn new(providers: Vec<Rc<dyn RenameProvider>>) -> Self {
		Self { providers }
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn first(&self) -> Option<&Rc<dyn RenameProvider>> {
		self.providers.first()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn RenameProvider>> {
		self.providers.iter()
	}
}

impl std::fmt::Debug for ProviderChain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.providers.iter().map(|p| p.name())).finish()
	}
}
