use thiserror::Error;
use xeno_primitives::EditError;

/// Failure reported by a rename provider.
///
/// Distinct from a structured rejection: a provider that cannot rename the
/// symbol returns a [`WorkspaceEdit`](xeno_primitives::WorkspaceEdit) with a
/// reject reason, while a provider that broke returns this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
	message: String,
}

impl ProviderError {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Errors from applying a workspace edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
	/// The edit is a rejection and carries nothing to apply.
	#[error("workspace edit has no edits to apply")]
	NoEdits,
	/// A resource edit targets a document the store does not know.
	#[error("document not found: {0}")]
	UnknownDocument(String),
	/// The edit was computed against another version of the document.
	#[error("edit arrived stale; document changed. url={url} expected={expected} actual={actual}")]
	VersionMismatch { url: String, expected: u64, actual: u64 },
	/// A text edit could not be applied to its document.
	#[error("invalid edit for {url}: {source}")]
	Edit {
		url: String,
		#[source]
		source: EditError,
	},
}

/// Errors surfaced by a rename session or the headless entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
	/// No provider is registered for the document.
	#[error("no rename provider for this document")]
	NoProvider,
	/// The first provider declined to rename the element at the position.
	#[error("{0}")]
	LocationRejected(String),
	/// A provider failed while resolving the rename location.
	#[error("failed to resolve rename location: {0}")]
	Location(#[source] ProviderError),
	/// A provider failed while computing edits.
	#[error("rename failed to execute: {0}")]
	Provider(#[source] ProviderError),
	/// The computed edit could not be applied.
	#[error("rename failed to apply edits: {0}")]
	Apply(#[from] ApplyError),
	/// A headless caller passed a malformed argument.
	#[error("illegal argument: {0}")]
	InvalidInput(String),
}

/// Errors loading [`RenameConfig`](crate::RenameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid rename config: {0}")]
	Parse(#[from] toml::de::Error),
}
