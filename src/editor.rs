use crate::error::{GridError, Result};

/// The text-editing widget, treated as an opaque collaborator: the core
/// only gets/sets text and pushes theme/mode hints, never inspects
/// internals.
pub trait TextEditor {
    fn get_value(&self) -> String;
    fn set_value(&mut self, text: &str);
    fn set_theme(&mut self, theme: &str);
    fn set_mode(&mut self, mode: &str);
}

/// In-memory editor used by tests and headless shells.
#[derive(Debug, Default, Clone)]
pub struct BufferEditor {
    value: String,
    theme: String,
    mode: String,
}

impl BufferEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }
}

impl TextEditor for BufferEditor {
    fn get_value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.value = text.to_string();
    }

    fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
    }

    fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }
}

/// Clipboard collaborator boundary.
pub trait Clipboard {
    fn read_text(&mut self) -> Result<String>;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. A fresh handle per operation; failures surface
/// as `GridError::Clipboard` for the caller to log.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| GridError::Clipboard(e.to_string()))?;
        clipboard
            .get_text()
            .map_err(|e| GridError::Clipboard(e.to_string()))
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| GridError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| GridError::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String> {
        self.contents
            .clone()
            .ok_or_else(|| GridError::Clipboard("clipboard is empty".into()))
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
