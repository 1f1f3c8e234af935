use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::range::Range;

/// A single replacement of `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
	pub range: Range,
	pub new_text: String,
}

impl TextEdit {
	pub fn new(range: Range, new_text: impl Into<String>) -> Self {
		Self {
			range,
			new_text: new_text.into(),
		}
	}
}

/// The text edits targeting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEdit {
	/// Target document.
	pub url: Url,
	/// Document version the edits were computed against, if the producer
	/// wants the application to be version-checked.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<u64>,
	pub edits: Vec<TextEdit>,
}

impl ResourceEdit {
	pub fn new(url: Url, edits: Vec<TextEdit>) -> Self {
		Self { url, version: None, edits }
	}

	/// Pins the edits to a document version.
	pub fn at_version(mut self, version: u64) -> Self {
		self.version = Some(version);
		self
	}
}

/// A change spanning one or more documents, or a rejection explaining why
/// no change could be produced.
///
/// Exactly one side is meaningful: `edits` when present and
/// `reject_reason` is empty, otherwise the rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEdit {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub edits: Option<Vec<ResourceEdit>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reject_reason: Option<String>,
}

impl WorkspaceEdit {
	/// An edit carrying the given per-resource changes.
	pub fn new(edits: Vec<ResourceEdit>) -> Self {
		Self {
			edits: Some(edits),
			reject_reason: None,
		}
	}

	/// A rejection with no edits.
	pub fn rejected(reason: impl Into<String>) -> Self {
		Self {
			edits: None,
			reject_reason: Some(reason.into()),
		}
	}

	/// Returns the rejection reason if this edit is a rejection.
	///
	/// An edit without `edits` is a rejection even if its reason is empty.
	pub fn rejection(&self) -> Option<&str> {
		match (&self.edits, self.reject_reason.as_deref()) {
			(_, Some(reason)) if !reason.is_empty() => Some(reason),
			(None, reason) => Some(reason.unwrap_or_default()),
			_ => None,
		}
	}

	/// Total number of text edits across all resources.
	pub fn text_edit_count(&self) -> usize {
		self.edits.iter().flatten().map(|r| r.edits.len()).sum()
	}
}

/// Errors raised while validating or applying text edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// The edit range does not exist in the document.
	#[error("edit range {0} is out of bounds")]
	OutOfBounds(Range),
	/// Two edits target the same region.
	#[error("overlapping edit at {0}")]
	Overlapping(Range),
	/// The document does not accept edits.
	#[error("read-only document: {0}")]
	ReadOnly(String),
}
