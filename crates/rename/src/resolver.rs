//! Provider fallback chain for one document and position.

use tracing::{debug, warn};
use xeno_primitives::{Document, Position, WorkspaceEdit};

use crate::error::RenameError;
use crate::provider::{LocationReply, ProviderChain, RenameLocation};
use crate::registry::ProviderRegistry;

/// Reason recorded for a provider that produced no result.
pub const NO_RESULT: &str = "No result.";

/// Resolves rename locations and edits against a fixed document snapshot.
///
/// The provider chain is captured at construction and stays stable for the
/// resolver's lifetime.
pub struct RenameResolver {
	document: Document,
	position: Position,
	providers: ProviderChain,
}

impl RenameResolver {
	pub fn new(registry: &dyn ProviderRegistry, document: Document, position: Position) -> Self {
		let providers = registry.ordered(&document);
		Self {
			document,
			position,
			providers,
		}
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	pub fn position(&self) -> Position {
		self.position
	}

	/// Returns true if at least one provider applies to the document.
	pub fn has_providers(&self) -> bool {
		!self.providers.is_empty()
	}

	/// Finds the symbol to rename at the resolver's position.
	///
	/// Only the first provider is asked for a location override; without one
	/// the word under (or just before) the position is used. `Ok(None)` means
	/// there is nothing to rename here.
	pub async fn locate(&self) -> Result<Option<RenameLocation>, RenameError> {
		if let Some(provider) = self.providers.first()
			&& provider.can_resolve_location()
		{
			match provider.resolve_location(&self.document, self.position).await {
				Ok(Some(LocationReply::Location(location))) => {
					debug!(provider = provider.name(), range = %location.range, "provider resolved rename location");
					return Ok(Some(location));
				}
				Ok(Some(LocationReply::Rejected(reason))) => {
					debug!(provider = provider.name(), %reason, "provider rejected rename location");
					return Err(RenameError::LocationRejected(reason));
				}
				Ok(None) => {}
				Err(err) => {
					warn!(provider = provider.name(), error = %err, "rename location request failed");
					return Err(RenameError::Location(err));
				}
			}
		}

		Ok(self.document.word_at(self.position).map(|(range, text)| RenameLocation { range, text }))
	}

	/// Walks the provider chain in order until one produces an edit.
	///
	/// Providers run strictly one after another. A provider that returns
	/// nothing or a reject reason hands over to the next; its reason is kept.
	/// If every provider declines, the result is a rejection whose reason is
	/// all collected reasons joined by newlines, in chain order. A provider
	/// error ends the walk immediately.
	pub async fn resolve_edits(&self, new_name: &str, from: Position) -> Result<WorkspaceEdit, RenameError> {
		let mut rejects = Vec::new();
		for (index, provider) in self.providers.iter().enumerate() {
			debug!(provider = provider.name(), index, %from, "requesting rename edits");
			let reply = provider.provide_edits(&self.document, from, new_name).await.map_err(|err| {
				warn!(provider = provider.name(), error = %err, "rename edit request failed");
				RenameError::Provider(err)
			})?;

			match reply {
				None => rejects.push(NO_RESULT.to_string()),
				Some(edit) => match edit.reject_reason.as_deref() {
					Some(reason) if !reason.is_empty() => rejects.push(reason.to_string()),
					_ => {
						debug!(provider = provider.name(), edits = edit.text_edit_count(), "provider produced rename edits");
						return Ok(edit);
					}
				},
			}
		}

		debug!(rejected = rejects.len(), "every rename provider declined");
		Ok(WorkspaceEdit::rejected(rejects.join("\n")))
	}
}
