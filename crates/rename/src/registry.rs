//! Rename provider registry.
//!
//! Maps documents to the rename providers that apply to them, in the order
//! the resolver should consult them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;
use xeno_primitives::Document;

use crate::provider::{ProviderChain, RenameProvider};

/// Source of the ordered provider chain for a document.
pub trait ProviderRegistry {
	/// Returns the providers applicable to `document`, highest priority first.
	fn ordered(&self, document: &Document) -> ProviderChain;
}

/// Which documents a provider applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSelector {
	/// Every document.
	Any,
	/// Documents with this language id.
	Language(String),
}

impl DocumentSelector {
	pub fn language(language: impl Into<String>) -> Self {
		Self::Language(language.into())
	}

	pub fn matches(&self, document: &Document) -> bool {
		match self {
			Self::Any => true,
			Self::Language(language) => document.language() == language.as_str(),
		}
	}
}

/// Identifies a registration for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderHandle(u64);

struct Entry {
	handle: ProviderHandle,
	selector: DocumentSelector,
	priority: i32,
	provider: Rc<dyn RenameProvider>,
}

/// In-process provider registry.
///
/// Ordering is priority descending, then most recently registered first.
#[derive(Default)]
pub struct Registry {
	entries: RefCell<Vec<Entry>>,
	next_handle: Cell<u64>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a provider for documents matching `selector`.
	pub fn register(&self, selector: DocumentSelector, priority: i32, provider: Rc<dyn RenameProvider>) -> ProviderHandle {
		let handle = ProviderHandle(self.next_handle.get());
		self.next_handle.set(handle.0 + 1);
		debug!(provider = provider.name(), priority, ?selector, "registered rename provider");
		self.entries.borrow_mut().push(Entry {
			handle,
			selector,
			priority,
			provider,
		});
		handle
	}

	/// Removes a registration. Returns false if the handle is unknown.
	pub fn unregister(&self, handle: ProviderHandle) -> bool {
		let mut entries = self.entries.borrow_mut();
		let before = entries.len();
		entries.retain(|e| e.handle != handle);
		entries.len() != before
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl ProviderRegistry for Registry {
	fn ordered(&self, document: &Document) -> ProviderChain {
		let entries = self.entries.borrow();
		let mut matching: Vec<&Entry> = entries.iter().filter(|e| e.selector.matches(document)).collect();
		matching.sort_by(|a, b| b.priority.cmp(&a.priority).then(b.handle.0.cmp(&a.handle.0)));
		ProviderChain::new(matching.into_iter().map(|e| Rc::clone(&e.provider)).collect())
	}
}
