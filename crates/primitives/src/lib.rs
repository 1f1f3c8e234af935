//! Core types for rename orchestration: positions, ranges, documents, and edits.

/// Documents: identity, versioned rope content, and coordinate conversion.
pub mod document;
/// Text, resource, and workspace edit types.
pub mod edit;
/// One-based line/column positions and ranges.
pub mod range;
/// Word-boundary lookup.
pub mod word;

pub use document::Document;
pub use edit::{EditError, ResourceEdit, TextEdit, WorkspaceEdit};
pub use range::{Position, Range};
pub use url::Url;
pub use word::is_word_char;
