//! Scripted collaborators shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use xeno_primitives::{Document, Position, Range, ResourceEdit, TextEdit, Url, WorkspaceEdit};

use crate::error::ProviderError;
use crate::host::{EditorView, Notifier, ScrollOffset};
use crate::provider::{LocationReply, RenameLocation, RenameProvider};
use crate::registry::{DocumentSelector, Registry};
use crate::workspace::Workspace;

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub(crate) fn url() -> Url {
	Url::parse("file:///project/src/main.rs").unwrap()
}

pub(crate) fn document(text: &str) -> Document {
	Document::new(url(), "rust", text)
}

/// An edit replacing `range` in the test document.
pub(crate) fn replace(range: Range, text: &str) -> WorkspaceEdit {
	WorkspaceEdit::new(vec![ResourceEdit::new(url(), vec![TextEdit::new(range, text)])])
}

pub(crate) enum Reply {
	Edit(WorkspaceEdit),
	Reject(String),
	Nothing,
	Fail(String),
}

/// A provider with canned replies that records how it was called.
pub(crate) struct ScriptedProvider {
	name: String,
	location: RefCell<Option<Result<Option<LocationReply>, ProviderError>>>,
	reply: Reply,
	delay: Option<Duration>,
	on_edits: RefCell<Option<Box<dyn FnOnce()>>>,
	on_location: RefCell<Option<Box<dyn FnOnce()>>>,
	pub edit_calls: RefCell<Vec<(Position, String)>>,
	pub location_calls: Cell<usize>,
}

impl ScriptedProvider {
	pub fn new(name: &str, reply: Reply) -> Self {
		Self {
			name: name.to_string(),
			location: RefCell::new(None),
			reply,
			delay: None,
			on_edits: RefCell::new(None),
			on_location: RefCell::new(None),
			edit_calls: RefCell::new(Vec::new()),
			location_calls: Cell::new(0),
		}
	}

	pub fn edit(name: &str, edit: WorkspaceEdit) -> Self {
		Self::new(name, Reply::Edit(edit))
	}

	pub fn reject(name: &str, reason: &str) -> Self {
		Self::new(name, Reply::Reject(reason.to_string()))
	}

	/// Answers location requests with `location`.
	pub fn with_location(self, location: Result<Option<LocationReply>, ProviderError>) -> Self {
		*self.location.borrow_mut() = Some(location);
		self
	}

	pub fn with_location_at(self, range: Range, text: &str) -> Self {
		self.with_location(Ok(Some(LocationReply::Location(RenameLocation::new(range, text)))))
	}

	/// Sleeps before answering edit requests.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Runs `hook` once while the edit request is in flight.
	pub fn on_edits(self, hook: impl FnOnce() + 'static) -> Self {
		*self.on_edits.borrow_mut() = Some(Box::new(hook));
		self
	}

	/// Runs `hook` once while the location request is in flight.
	pub fn on_location(self, hook: impl FnOnce() + 'static) -> Self {
		*self.on_location.borrow_mut() = Some(Box::new(hook));
		self
	}

	pub fn calls(&self) -> usize {
		self.edit_calls.borrow().len()
	}
}

#[async_trait(?Send)]
impl RenameProvider for ScriptedProvider {
	fn name(&self) -> &str {
		&self.name
	}

	fn can_resolve_location(&self) -> bool {
		self.location.borrow().is_some()
	}

	async fn resolve_location(&self, _document: &Document, _position: Position) -> Result<Option<LocationReply>, ProviderError> {
		self.location_calls.set(self.location_calls.get() + 1);
		let hook = self.on_location.borrow_mut().take();
		if let Some(hook) = hook {
			hook();
		}
		self.location.borrow().clone().unwrap_or(Ok(None))
	}

	async fn provide_edits(&self, _document: &Document, position: Position, new_name: &str) -> Result<Option<WorkspaceEdit>, ProviderError> {
		self.edit_calls.borrow_mut().push((position, new_name.to_string()));
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		let hook = self.on_edits.borrow_mut().take();
		if let Some(hook) = hook {
			hook();
		}
		match &self.reply {
			Reply::Edit(edit) => Ok(Some(edit.clone())),
			Reply::Reject(reason) => Ok(Some(WorkspaceEdit::rejected(reason.clone()))),
			Reply::Nothing => Ok(None),
			Reply::Fail(message) => Err(ProviderError::new(message.clone())),
		}
	}
}

/// Registers providers in chain order (first argument is consulted first).
pub(crate) fn registry_of(providers: &[Rc<ScriptedProvider>]) -> Registry {
	let registry = Registry::new();
	for (index, provider) in providers.iter().enumerate() {
		let priority = -(index as i32);
		registry.register(DocumentSelector::Any, priority, Rc::clone(provider) as Rc<dyn RenameProvider>);
	}
	registry
}

/// An editor over one workspace document with recorded UI effects.
pub(crate) struct TestEditor {
	workspace: Rc<Workspace>,
	url: Url,
	pub cursor: Cell<Position>,
	pub selection: Cell<Range>,
	pub scroll: Cell<ScrollOffset>,
	pub focus_count: Cell<usize>,
	pub inline_messages: RefCell<Vec<(Position, String)>>,
	pub progress: RefCell<Vec<bool>>,
}

impl TestEditor {
	pub fn new(workspace: Rc<Workspace>, url: Url, cursor: Position) -> Self {
		Self {
			workspace,
			url,
			cursor: Cell::new(cursor),
			selection: Cell::new(Range::point(cursor)),
			scroll: Cell::new(ScrollOffset::default()),
			focus_count: Cell::new(0),
			inline_messages: RefCell::new(Vec::new()),
			progress: RefCell::new(Vec::new()),
		}
	}

	/// Simulates the user typing at the start of the document.
	pub fn type_text(&self, text: &str) {
		let at = Range::point(Position::new(1, 1));
		self.workspace.edit_document(&self.url, &[TextEdit::new(at, text)]).unwrap();
	}
}

impl EditorView for TestEditor {
	fn document(&self) -> Document {
		self.workspace.get(&self.url).unwrap()
	}

	fn cursor(&self) -> Position {
		self.cursor.get()
	}

	fn selection(&self) -> Range {
		self.selection.get()
	}

	fn scroll(&self) -> ScrollOffset {
		self.scroll.get()
	}

	fn focus(&self) {
		self.focus_count.set(self.focus_count.get() + 1);
	}

	fn show_inline_message(&self, at: Position, message: &str) {
		self.inline_messages.borrow_mut().push((at, message.to_string()));
	}

	fn set_progress(&self, visible: bool) {
		self.progress.borrow_mut().push(visible);
	}
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
	pub infos: RefCell<Vec<String>>,
	pub errors: RefCell<Vec<String>>,
	pub announcements: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
	fn info(&self, message: &str) {
		self.infos.borrow_mut().push(message.to_string());
	}

	fn error(&self, message: &str) {
		self.errors.borrow_mut().push(message.to_string());
	}

	fn announce(&self, message: &str) {
		self.announcements.borrow_mut().push(message.to_string());
	}
}
