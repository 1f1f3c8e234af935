use std::future::Future;
use std::time::Duration;

use crate::host::EditorView;

/// Hides the progress indicator when dropped.
struct ProgressGuard<'a> {
	editor: &'a dyn EditorView,
}

impl<'a> ProgressGuard<'a> {
	fn show(editor: &'a dyn EditorView) -> Self {
		editor.set_progress(true);
		Self { editor }
	}
}

impl Drop for ProgressGuard<'_> {
	fn drop(&mut self) {
		self.editor.set_progress(false);
	}
}

/// Awaits `fut`, showing the editor's progress indicator only if it is still
/// pending after `delay`.
///
/// Fast completions never flash the indicator. Once shown, it is hidden
/// when `fut` finishes or the returned future is dropped.
pub async fn with_delayed_progress<F: Future>(editor: &dyn EditorView, delay: Duration, fut: F) -> F::Output {
	tokio::pin!(fut);
	tokio::select! {
		biased;
		out = &mut fut => return out,
		() = tokio::time::sleep(delay) => {}
	}
	let _guard = ProgressGuard::show(editor);
	fut.await
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use xeno_primitives::Position;

	use super::*;
	use crate::test_support::{TestEditor, document, url};
	use crate::workspace::Workspace;

	fn editor() -> TestEditor {
		let workspace = Rc::new(Workspace::new());
		workspace.open(document("foo"));
		TestEditor::new(workspace, url(), Position::new(1, 1))
	}

	#[tokio::test(start_paused = true)]
	async fn fast_future_never_shows_progress() {
		let editor = editor();
		let out = with_delayed_progress(&editor, Duration::from_millis(250), async {
			tokio::time::sleep(Duration::from_millis(100)).await;
			7
		})
		.await;
		assert_eq!(out, 7);
		assert!(editor.progress.borrow().is_empty());
	}

	#[tokio::test(start_paused = true)]
	async fn slow_future_shows_then_hides_progress() {
		let editor = editor();
		let out = with_delayed_progress(&editor, Duration::from_millis(250), async {
			tokio::time::sleep(Duration::from_secs(2)).await;
			"done"
		})
		.await;
		assert_eq!(out, "done");
		assert_eq!(*editor.progress.borrow(), [true, false]);
	}

	#[tokio::test]
	async fn ready_future_wins_over_zero_delay() {
		let editor = editor();
		let out = with_delayed_progress(&editor, Duration::ZERO, async { 1 }).await;
		assert_eq!(out, 1);
		assert!(editor.progress.borrow().is_empty());
	}
}
