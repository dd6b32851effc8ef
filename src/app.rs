use std::sync::Arc;

use serde_json::Value;

use crate::config::{Theme, ThemeStore};
use crate::dom;
use crate::editor::{Clipboard, TextEditor};
use crate::error::Result;
use crate::grid::RenderSession;
use crate::interact::DEFAULT_PATH_MESSAGE;
use crate::path::PathExpression;
use crate::search::{self, SearchScheduler};
use crate::state::AppState;

/// The glue shell around the engine: editor text in, rendered grid out,
/// plus clipboard, theme and search entry points. The blocking alerts on
/// parse failure belong to the hosting shell; this layer logs the
/// diagnostic and returns the error.
pub struct GridApp<E: TextEditor, C: Clipboard> {
    state: Arc<AppState>,
    session: RenderSession,
    editor: E,
    clipboard: C,
    themes: ThemeStore,
    theme: Theme,
}

impl<E: TextEditor, C: Clipboard> GridApp<E, C> {
    /// Applies the persisted theme (dark by default) and the JSON mode
    /// hint to the editor on startup.
    pub fn new(mut editor: E, clipboard: C, themes: ThemeStore) -> Self {
        let theme = themes.load().unwrap_or(Theme::Dark);
        editor.set_mode("json");
        editor.set_theme(theme.editor_theme());
        Self {
            state: Arc::new(AppState::default()),
            session: RenderSession::new(),
            editor,
            clipboard,
            themes,
            theme,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Parse the editor text and rebuild the grid from scratch. Returns
    /// whether anything was rendered: a top-level `null` means "nothing
    /// to render" and leaves the previous output alone. Parse failures
    /// are logged and propagated; no partial render occurs.
    pub fn render_from_editor(&mut self) -> Result<bool> {
        let text = self.editor.get_value();
        let doc: Value = match serde_json::from_str(&text) {
            Ok(doc) => doc,
            Err(err) => {
                log::error!("invalid JSON input: {err}");
                return Err(err.into());
            }
        };
        let Some(node) = self.session.render_document(&doc) else {
            return Ok(false);
        };
        let mut view = dom::mount(&node);
        self.state.interact.lock().wire(&mut view);
        *self.state.doc.write() = Some(Arc::new(doc));
        *self.state.view.write() = Some(view);
        Ok(true)
    }

    pub fn clear_editor(&mut self) {
        self.editor.set_value("");
    }

    /// Clipboard text into the editor. Failures are logged diagnostics
    /// only; the operation is a no-op from the user's perspective.
    pub fn paste(&mut self) {
        match self.clipboard.read_text() {
            Ok(text) => self.editor.set_value(&text),
            Err(err) => log::error!("failed to read clipboard contents: {err}"),
        }
    }

    /// Reformat the editor's JSON with indentation. Parse failures are
    /// logged and propagated for the shell's blocking alert.
    pub fn format_json(&mut self) -> Result<()> {
        let text = self.editor.get_value();
        let doc: Value = match serde_json::from_str(&text) {
            Ok(doc) => doc,
            Err(err) => {
                log::error!("error formatting JSON: {err}");
                return Err(err.into());
            }
        };
        let formatted = serde_json::to_string_pretty(&doc)?;
        self.editor.set_value(&formatted);
        Ok(())
    }

    /// Copy the displayed path to the clipboard, unless the display still
    /// shows the placeholder. Failures are logged only.
    pub fn copy_path(&mut self) {
        let text = {
            let interact = self.state.interact.lock();
            interact.display_text().trim().to_string()
        };
        if text.is_empty() || text == DEFAULT_PATH_MESSAGE {
            return;
        }
        match self.clipboard.write_text(&text) {
            Ok(()) => log::debug!("path copied: {text}"),
            Err(err) => log::error!("could not copy text: {err}"),
        }
    }

    /// Copy the pretty-printed JSON value at the locked cell's path, if
    /// any. Failures are logged only.
    pub fn copy_value(&mut self) {
        let Some(path_text) = self.state.interact.lock().locked_path().map(str::to_string)
        else {
            return;
        };
        let Some(path) = PathExpression::parse(&path_text) else {
            return;
        };
        let doc = {
            let guard = self.state.doc.read();
            let Some(doc) = &*guard else { return };
            Arc::clone(doc)
        };
        let Some(value) = path.resolve(&doc) else {
            log::error!("no value at {path_text}");
            return;
        };
        match serde_json::to_string_pretty(value) {
            Ok(serialized) => {
                if let Err(err) = self.clipboard.write_text(&serialized) {
                    log::error!("could not copy value: {err}");
                }
            }
            Err(err) => log::error!("could not serialize value at {path_text}: {err}"),
        }
    }

    /// Flip the theme, persist the flag and restyle the editor. Returns
    /// the new theme so the shell can relabel its toggle control.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.editor.set_theme(self.theme.editor_theme());
        if let Err(err) = self.themes.save(self.theme) {
            log::error!("failed to persist theme: {err}");
        }
        self.theme
    }

    pub fn hover(&self, cell: usize) {
        let mut view = self.state.view.write();
        let Some(root) = view.as_mut() else { return };
        self.state.interact.lock().hover(root, cell);
    }

    pub fn unhover(&self, cell: usize) {
        let mut view = self.state.view.write();
        let Some(root) = view.as_mut() else { return };
        self.state.interact.lock().unhover(root, cell);
    }

    pub fn click(&self, cell: usize) {
        let mut view = self.state.view.write();
        let Some(root) = view.as_mut() else { return };
        self.state.interact.lock().click(root, cell);
    }

    /// Toggle the expander bound to `instance_id`'s table.
    pub fn toggle_container(&self, instance_id: u64) -> bool {
        let mut view = self.state.view.write();
        let Some(root) = view.as_mut() else { return false };
        dom::toggle_expander(root, &format!("table-{instance_id}"))
    }

    pub fn path_display(&self) -> String {
        self.state.interact.lock().display_text().to_string()
    }

    /// Run a search pass immediately, bypassing the debounce.
    pub fn search_now(&self, query: &str) {
        let mut view = self.state.view.write();
        if let Some(root) = view.as_mut() {
            search::perform_search(root, query);
        }
    }

    /// Debounced search entry point bound to this app's state.
    pub fn search_scheduler(&self, runtime: tokio::runtime::Handle) -> SearchScheduler {
        SearchScheduler::new(self.state(), runtime)
    }

    /// Serialized markup of the current view.
    pub fn html(&self) -> Option<String> {
        self.state.view.read().as_ref().map(|root| root.to_html())
    }
}
