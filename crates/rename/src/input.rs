//! Rename input contract and a channel-backed implementation.

use std::cell::RefCell;
use std::ops::Range as CharRange;

use async_trait::async_trait;
use tokio::sync::oneshot;
use xeno_primitives::Range;

/// What the input widget is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
	/// Span of the symbol being renamed.
	pub range: Range,
	/// Current symbol text, used as the initial value.
	pub text: String,
	/// Char offsets into `text` to pre-select.
	pub selection: CharRange<usize>,
}

/// How the input widget was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
	/// The user confirmed a name.
	Confirmed(String),
	/// The user dismissed the widget.
	Cancelled { focus_editor: bool },
}

/// Interactive widget collecting the new name.
#[async_trait(?Send)]
pub trait InputCollector {
	/// Opens the widget and waits until it is accepted or cancelled.
	async fn get_input(&self, request: InputRequest) -> InputResult;
	/// Confirms the pending input with its current value.
	fn accept(&self);
	/// Dismisses the pending input.
	fn cancel(&self, focus_editor: bool);
}

struct Pending {
	tx: oneshot::Sender<InputResult>,
	value: String,
}

/// [`InputCollector`] completed through `accept`/`cancel` calls.
///
/// The frontend edits the value with [`PromptInput::set_value`] while the
/// prompt is open. Opening a new prompt dismisses the previous one.
#[derive(Default)]
pub struct PromptInput {
	pending: RefCell<Option<Pending>>,
	last_request: RefCell<Option<InputRequest>>,
}

impl PromptInput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_open(&self) -> bool {
		self.pending.borrow().is_some()
	}

	/// Current value of the open prompt.
	pub fn value(&self) -> Option<String> {
		self.pending.borrow().as_ref().map(|p| p.value.clone())
	}

	/// Replaces the value of the open prompt. No-op when closed.
	pub fn set_value(&self, value: impl Into<String>) {
		if let Some(pending) = self.pending.borrow_mut().as_mut() {
			pending.value = value.into();
		}
	}

	/// The request the prompt was last opened with.
	pub fn last_request(&self) -> Option<InputRequest> {
		self.last_request.borrow().clone()
	}

	fn finish(&self, result: impl FnOnce(String) -> InputResult) {
		if let Some(pending) = self.pending.borrow_mut().take() {
			let _ = pending.tx.send(result(pending.value));
		}
	}
}

#[async_trait(?Send)]
impl InputCollector for PromptInput {
	async fn get_input(&self, request: InputRequest) -> InputResult {
		let (tx, rx) = oneshot::channel();
		let value = request.text.clone();
		*self.last_request.borrow_mut() = Some(request);
		// Replacing drops the previous sender, which resolves its waiter as cancelled.
		*self.pending.borrow_mut() = Some(Pending { tx, value });
		rx.await.unwrap_or(InputResult::Cancelled { focus_editor: false })
	}

	fn accept(&self) {
		self.finish(InputResult::Confirmed);
	}

	fn cancel(&self, focus_editor: bool) {
		self.finish(|_| InputResult::Cancelled { focus_editor });
	}
}
