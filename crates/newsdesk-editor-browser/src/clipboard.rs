//! Browser clipboard implementation.
//!
//! Implements `ClipboardPlatform` over a paste event's `DataTransfer`. Only
//! the `text/plain` flavor is ever read.

use newsdesk_editor_core::ClipboardPlatform;

/// Clipboard context wrapping a ClipboardEvent's DataTransfer.
pub struct BrowserClipboard {
    data_transfer: Option<web_sys::DataTransfer>,
}

impl BrowserClipboard {
    /// Call this in the paste handler, before preventing default.
    pub fn from_event(evt: &web_sys::ClipboardEvent) -> Self {
        Self {
            data_transfer: evt.clipboard_data(),
        }
    }

    /// An empty clipboard context (for testing or non-event contexts).
    pub fn empty() -> Self {
        Self {
            data_transfer: None,
        }
    }
}

impl ClipboardPlatform for BrowserClipboard {
    fn read_text(&self) -> Option<String> {
        let dt = self.data_transfer.as_ref()?;
        match dt.get_data("text/plain") {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(target: "newsdesk::clipboard", "Clipboard read failed: {:?}", e);
                None
            }
        }
    }
}
