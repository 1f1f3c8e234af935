//! Per-editor rename session controller.

mod session;

use std::cell::Cell;
use std::rc::Rc;

use tracing::{Instrument, debug, info_span, warn};

pub use self::session::{RejectionSurface, RenameOutcome, SessionState, SkipReason, prefill_selection};
use self::session::{RenameSession, SessionGuard};
use crate::apply::{ApplyContext, BulkEditApplier};
use crate::config::RenameConfig;
use crate::error::RenameError;
use crate::host::{EditorStateSnapshot, EditorView, Notifier};
use crate::input::{InputCollector, InputRequest, InputResult};
use crate::progress::with_delayed_progress;
use crate::registry::ProviderRegistry;
use crate::resolver::{NO_RESULT, RenameResolver};

const READ_ONLY: &str = "Cannot rename in a read-only document";
const LOCATION_FAILED: &str = "An unknown error occurred while resolving rename location";
const EXECUTE_FAILED: &str = "Rename failed to execute.";
const APPLY_FAILED: &str = "Rename failed to apply edits.";

/// Collaborators a [`RenameOrchestrator`] drives.
#[derive(Clone)]
pub struct RenameServices {
	pub editor: Rc<dyn EditorView>,
	pub registry: Rc<dyn ProviderRegistry>,
	pub input: Rc<dyn InputCollector>,
	pub applier: Rc<dyn BulkEditApplier>,
	pub notifier: Rc<dyn Notifier>,
}

/// Runs rename sessions for one editor.
///
/// At most one session is active at a time; starting another while one is
/// in flight is refused with [`SkipReason::Busy`]. The accept/cancel
/// commands are only honored while the input is visible, which is exactly
/// while the session is in [`SessionState::AwaitingInput`].
pub struct RenameOrchestrator {
	services: RenameServices,
	config: RenameConfig,
	state: Cell<SessionState>,
}

impl RenameOrchestrator {
	pub fn new(services: RenameServices, config: RenameConfig) -> Self {
		Self {
			services,
			config,
			state: Cell::new(SessionState::Idle),
		}
	}

	pub fn state(&self) -> SessionState {
		self.state.get()
	}

	/// Whether the rename input is showing.
	pub fn is_input_visible(&self) -> bool {
		self.state.get() == SessionState::AwaitingInput
	}

	/// Confirms the pending input. Returns false when no input is visible.
	pub fn accept_input(&self) -> bool {
		if !self.is_input_visible() {
			return false;
		}
		self.services.input.accept();
		true
	}

	/// Dismisses the pending input. Returns false when no input is visible.
	pub fn cancel_input(&self, focus_editor: bool) -> bool {
		if !self.is_input_visible() {
			return false;
		}
		self.services.input.cancel(focus_editor);
		true
	}

	/// Starts a rename at the editor's cursor and runs it to completion.
	///
	/// Structured outcomes, including rejections, are returned as
	/// [`RenameOutcome`]. Provider and apply failures are reported to the user
	/// and then returned as errors; nothing is partially applied.
	pub async fn start_rename(&self) -> Result<RenameOutcome, RenameError> {
		if self.state.get().is_active() {
			debug!(state = ?self.state.get(), "rename already in progress");
			return Ok(RenameOutcome::Skipped(SkipReason::Busy));
		}

		let editor = self.services.editor.as_ref();
		let document = editor.document();
		let position = editor.cursor();
		let span = info_span!("rename", uri = %document.url(), %position);
		let resolver = RenameResolver::new(self.services.registry.as_ref(), document, position);
		if !resolver.has_providers() {
			return Ok(RenameOutcome::Skipped(SkipReason::NoProvider));
		}
		if resolver.document().is_readonly() {
			self.services.notifier.info(READ_ONLY);
			return Ok(RenameOutcome::Skipped(SkipReason::ReadOnly));
		}

		self.run_session(resolver).instrument(span).await
	}

	async fn run_session(&self, resolver: RenameResolver) -> Result<RenameOutcome, RenameError> {
		let editor = self.services.editor.as_ref();
		let guard = SessionGuard::begin(&self.state);
		let position = resolver.position();
		let before_locate = EditorStateSnapshot::capture(editor);

		let location = match resolver.locate().await {
			Ok(Some(location)) => location,
			Ok(None) => {
				debug!("nothing to rename at cursor");
				guard.transition(SessionState::Cancelled);
				return Ok(RenameOutcome::Skipped(SkipReason::NoLocation));
			}
			Err(err) => {
				let message = match err {
					RenameError::LocationRejected(reason) => reason,
					RenameError::Location(err) if !err.message().is_empty() => err.message().to_string(),
					_ => LOCATION_FAILED.to_string(),
				};
				editor.show_inline_message(position, &message);
				guard.transition(SessionState::Errored);
				return Ok(RenameOutcome::LocationFailed(message));
			}
		};
		if !before_locate.same_position_and_content(editor) {
			debug!("editor changed while resolving rename location");
			guard.transition(SessionState::Cancelled);
			return Ok(RenameOutcome::Skipped(SkipReason::Stale));
		}

		let mut session = RenameSession::new(resolver.document().url().clone(), position, location);
		let request = InputRequest {
			range: session.location.range,
			text: session.old_name().to_string(),
			selection: prefill_selection(&session.location, editor.selection()),
		};

		guard.transition(SessionState::AwaitingInput);
		let result = self.services.input.get_input(request).await;
		let new_name = match result {
			InputResult::Cancelled { focus_editor } => {
				guard.transition(SessionState::Cancelled);
				if focus_editor {
					editor.focus();
				}
				return Ok(RenameOutcome::Cancelled);
			}
			InputResult::Confirmed(name) if self.config.trim_new_name => name.trim().to_string(),
			InputResult::Confirmed(name) => name,
		};
		if new_name.is_empty() || new_name == session.old_name() {
			debug!(%new_name, "rename input unchanged");
			guard.transition(SessionState::Cancelled);
			editor.focus();
			return Ok(RenameOutcome::Cancelled);
		}

		guard.transition(SessionState::Resolving);
		editor.focus();
		let baseline = EditorStateSnapshot::capture(editor);
		let resolved = with_delayed_progress(editor, self.config.progress_delay(), resolver.resolve_edits(&new_name, session.anchor())).await;
		session.new_name = Some(new_name);

		let edit = match resolved {
			Ok(edit) => edit,
			Err(err) => {
				warn!(error = %err, "rename edit resolution failed");
				guard.transition(SessionState::Errored);
				self.services.notifier.error(EXECUTE_FAILED);
				return Err(err);
			}
		};

		if let Some(reason) = edit.rejection() {
			let reason = if reason.is_empty() { NO_RESULT } else { reason }.to_string();
			guard.transition(SessionState::Rejected);
			let surface = if baseline.is_current(editor) {
				editor.show_inline_message(editor.cursor(), &reason);
				RejectionSurface::Inline
			} else {
				debug!(baseline_version = baseline.version(), "editor changed during rename; downgrading rejection");
				self.services.notifier.info(&reason);
				RejectionSurface::Notification
			};
			return Ok(RenameOutcome::Rejected { reason, surface });
		}

		guard.transition(SessionState::Applying);
		let new_name = session.new_name.as_deref().unwrap_or_default();
		let context = ApplyContext::rename(session.url.clone(), session.old_name(), new_name);
		match self.services.applier.apply(&edit, &context).await {
			Ok(result) => {
				guard.transition(SessionState::Done);
				if self.config.announce_summary
					&& let Some(summary) = &result.aria_summary
				{
					self.services.notifier.announce(&format!(
						"Successfully renamed '{}' to '{}'. Summary: {}",
						session.old_name(),
						new_name,
						summary
					));
				}
				debug!(edits = result.applied_edits, documents = result.touched_documents, at = %session.position, "rename applied");
				Ok(RenameOutcome::Renamed { summary: result.aria_summary })
			}
			Err(err) => {
				warn!(error = %err, "rename edit application failed");
				guard.transition(SessionState::Errored);
				self.services.notifier.error(APPLY_FAILED);
				Err(RenameError::Apply(err))
			}
		}
	}
}
