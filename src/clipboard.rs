//! System clipboard access
//!
//! The poller only needs "give me the current text, if any"; copying the
//! buffer back needs a write. Both go through [`ClipboardAccess`] so the
//! view logic can run against an in-memory clipboard in tests.

use arboard::Clipboard;
use tracing::{debug, info, warn};

use crate::error::ClipboardError;

/// Read/write access to clipboard text
pub(crate) trait ClipboardAccess {
    /// Current clipboard text, or `None` when the clipboard holds no text
    fn read_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by `arboard`.
///
/// The handle is opened on first use and dropped after a failure so that
/// the next access reconnects instead of reusing a dead handle. Only the
/// first failure in a row is logged at `warn`; repeats go to `debug` until
/// the clipboard works again.
#[derive(Default)]
pub(crate) struct SystemClipboard {
    handle: Option<Clipboard>,
    failing: bool,
}

impl SystemClipboard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.handle.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.handle = Some(clipboard);
        }
        self.handle
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".to_string()))
    }

    /// Record a failure. Returns true when it starts a new run of failures.
    fn note_failure(&mut self) -> bool {
        !std::mem::replace(&mut self.failing, true)
    }

    fn note_success(&mut self) {
        if std::mem::take(&mut self.failing) {
            info!("Clipboard access restored");
        }
    }

    fn log_failure(&mut self, message: &str) {
        if self.note_failure() {
            warn!("{}", message);
        } else {
            debug!("{}", message);
        }
    }
}

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        let clipboard = match self.handle() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                self.log_failure(&e.to_string());
                return None;
            }
        };

        match clipboard.get_text() {
            Ok(text) => {
                self.note_success();
                Some(text)
            }
            Err(arboard::Error::ContentNotAvailable) => {
                self.note_success();
                debug!("Clipboard holds no text");
                None
            }
            Err(e) => {
                self.handle = None;
                self.log_failure(&format!("Failed to read clipboard text: {}", e));
                None
            }
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.handle()?;
        if let Err(e) = clipboard.set_text(text) {
            self.handle = None;
            return Err(ClipboardError::Write(e.to_string()));
        }
        debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}

/// In-memory clipboard for tests
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryClipboard {
    pub text: Option<String>,
    pub reads: usize,
}

#[cfg(test)]
impl MemoryClipboard {
    pub(crate) fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            reads: 0,
        }
    }
}

#[cfg(test)]
impl ClipboardAccess for MemoryClipboard {
    fn read_text(&mut self) -> Option<String> {
        self.reads += 1;
        self.text.clone()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}
