//! Symbol rename orchestration.
//!
//! A rename runs in two halves. [`RenameResolver`] owns the provider fallback
//! chain for one document and position: it finds the span of the symbol
//! under the cursor and walks the ordered providers until one produces a
//! [`WorkspaceEdit`]. [`RenameOrchestrator`] drives one interactive session
//! per editor around it: it locates the symbol, collects the new name from an
//! [`InputCollector`], resolves edits under a delayed progress indicator, and
//! applies them through a [`BulkEditApplier`]. Rejections are shown inline
//! when the editor is unchanged since the name was confirmed, and as a
//! passive notification otherwise.
//!
//! Everything runs on one cooperative task. Collaborator traits take `&self`
//! so the editor can keep dispatching commands while a session is suspended.
//!
//! Headless callers use [`rename`] or [`execute_rename_command`].

mod apply;
mod command;
mod config;
mod error;
mod host;
mod input;
mod orchestrator;
mod progress;
mod provider;
mod registry;
mod resolver;
#[cfg(test)]
mod test_support;
mod workspace;

pub use apply::{ApplyContext, ApplyResult, BulkEditApplier, DocumentStore, RENAME_UNDO_GROUP};
pub use command::{execute_rename_command, rename};
pub use config::RenameConfig;
pub use error::{ApplyError, ConfigError, ProviderError, RenameError};
pub use host::{EditorStateSnapshot, EditorView, Notifier, ScrollOffset};
pub use input::{InputCollector, InputRequest, InputResult, PromptInput};
pub use orchestrator::{RejectionSurface, RenameOrchestrator, RenameOutcome, RenameServices, SessionState, SkipReason, prefill_selection};
pub use progress::with_delayed_progress;
pub use provider::{LocationReply, ProviderChain, RenameLocation, RenameProvider};
pub use registry::{DocumentSelector, ProviderHandle, ProviderRegistry, Registry};
pub use resolver::{NO_RESULT, RenameResolver};
pub use workspace::Workspace;
pub use xeno_primitives::{Document, Position, Range, ResourceEdit, TextEdit, WorkspaceEdit};
