//! Headless rename entry points.

use serde_json::Value;
use tracing::debug;
use url::Url;
use xeno_primitives::{Document, Position, WorkspaceEdit};

use crate::apply::DocumentStore;
use crate::error::RenameError;
use crate::registry::ProviderRegistry;
use crate::resolver::RenameResolver;

/// Computes the rename edit for `new_name` at `position` without any UI.
///
/// The located symbol's start is used as the anchor; when nothing is located
/// the given position is passed to providers as-is. A location the first
/// provider refuses yields a rejected edit rather than an error.
pub async fn rename(registry: &dyn ProviderRegistry, document: Document, position: Position, new_name: &str) -> Result<WorkspaceEdit, RenameError> {
	let resolver = RenameResolver::new(registry, document, position);
	if !resolver.has_providers() {
		return Err(RenameError::NoProvider);
	}

	let anchor = match resolver.locate().await {
		Ok(location) => location.map_or(position, |location| location.range.start),
		Err(RenameError::LocationRejected(reason)) => return Ok(WorkspaceEdit::rejected(reason)),
		Err(err) => return Err(err),
	};
	debug!(uri = %resolver.document().url(), %position, %anchor, "headless rename");
	resolver.resolve_edits(new_name, anchor).await
}

/// Runs a rename from positional command arguments `[uri, position, newName]`.
///
/// `position` is an object with one-based `line` and `column`.
pub async fn execute_rename_command(registry: &dyn ProviderRegistry, store: &dyn DocumentStore, args: &[Value]) -> Result<WorkspaceEdit, RenameError> {
	let [uri, position, new_name] = args else {
		return Err(invalid(format!("expected 3 arguments, got {}", args.len())));
	};

	let Value::String(uri) = uri else {
		return Err(invalid("uri must be a string"));
	};
	let uri = Url::parse(uri).map_err(|err| invalid(format!("uri: {err}")))?;
	let position: Position = serde_json::from_value(position.clone()).map_err(|err| invalid(format!("position: {err}")))?;
	let Value::String(new_name) = new_name else {
		return Err(invalid("newName must be a string"));
	};
	let document = store.document(&uri).ok_or_else(|| invalid(format!("unknown document {uri}")))?;

	rename(registry, document, position, new_name).await
}

fn invalid(message: impl Into<String>) -> RenameError {
	RenameError::InvalidInput(message.into())
}
