use thiserror::Error;

/// Errors writing to the clipboard
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Clipboard abstraction for copy actions
pub trait Clipboard: Send {
    fn set_text(&mut self, contents: &str) -> Result<(), ClipboardError>;
}

/// System clipboard using arboard, connected on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, contents: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(contents.to_string())?;
        }
        Ok(())
    }
}

/// In-process clipboard, for headless runs and tests
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    /// Writes fail when set
    pub fail: bool,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, contents: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Backend(arboard::Error::ClipboardNotSupported));
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }
}
