//! Paste sanitization.
//!
//! Pasted content is reduced to plain text before it reaches the surface. The
//! clipboard's rich flavors are never read, so foreign markup and inline styles
//! cannot enter the document and the content stays within what the toolbar
//! itself can produce.

use crate::platform::{ClipboardPlatform, EditSurface};

/// What a paste did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Plain text was inserted.
    Inserted { chars: usize },
    /// Clipboard had no usable plain text. Nothing was inserted.
    Empty,
    /// The surface refused the insertion.
    Rejected,
}

impl PasteOutcome {
    pub fn inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Normalize clipboard text for insertion.
///
/// Line endings become `\n`. Control characters other than `\n` and `\t` are
/// dropped. When `max_chars` is set the result is truncated to that many chars.
pub fn normalize_plain_text(text: &str, max_chars: Option<usize>) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned = unified
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t');
    match max_chars {
        Some(max) => cleaned.take(max).collect(),
        None => cleaned.collect(),
    }
}

/// Insert the clipboard's plain-text flavor into the surface.
///
/// The caller is responsible for suppressing the host's default paste and for
/// running the local-edit path afterwards when text was inserted.
pub fn sanitize_paste<S, C>(surface: &mut S, clipboard: &C, max_chars: Option<usize>) -> PasteOutcome
where
    S: EditSurface + ?Sized,
    C: ClipboardPlatform + ?Sized,
{
    let Some(raw) = clipboard.read_text() else {
        tracing::debug!(target: "newsdesk::paste", "clipboard has no plain text");
        return PasteOutcome::Empty;
    };

    let text = normalize_plain_text(&raw, max_chars);
    if text.is_empty() {
        return PasteOutcome::Empty;
    }

    match surface.insert_plain_text(&text) {
        Ok(()) => PasteOutcome::Inserted {
            chars: text.chars().count(),
        },
        Err(e) => {
            tracing::debug!(target: "newsdesk::paste", error = %e, "surface rejected paste");
            PasteOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryClipboard, MemorySurface};

    #[test]
    fn test_normalize_line_endings_and_controls() {
        assert_eq!(normalize_plain_text("a\r\nb\rc\n", None), "a\nb\nc\n");
        assert_eq!(normalize_plain_text("x\u{0}y\u{7}z\tw", None), "xyz\tw");
    }

    #[test]
    fn test_normalize_truncates() {
        assert_eq!(normalize_plain_text("héllo world", Some(5)), "héllo");
    }

    #[test]
    fn test_paste_ignores_html_flavor() {
        let mut surface = MemorySurface::new();
        let clipboard = MemoryClipboard::new()
            .with_html(r#"<h1 style="color: red">Title</h1>"#)
            .with_text("Title");

        let outcome = sanitize_paste(&mut surface, &clipboard, None);

        assert_eq!(outcome, PasteOutcome::Inserted { chars: 5 });
        assert_eq!(surface.content(), "<p>Title</p>");
    }

    #[test]
    fn test_paste_markup_text_is_literal() {
        let mut surface = MemorySurface::new();
        let clipboard = MemoryClipboard::new().with_text("<h1>Title</h1>");

        sanitize_paste(&mut surface, &clipboard, None);

        assert_eq!(surface.content(), "<p>&lt;h1&gt;Title&lt;/h1&gt;</p>");
        assert_eq!(surface.plain_text(), "<h1>Title</h1>");
    }

    #[test]
    fn test_paste_without_plain_text_is_empty() {
        let mut surface = MemorySurface::from_markup("<p>keep</p>");
        let clipboard = MemoryClipboard::new().with_html("<b>rich only</b>");

        assert_eq!(sanitize_paste(&mut surface, &clipboard, None), PasteOutcome::Empty);
        assert_eq!(surface.content(), "<p>keep</p>");
    }

    #[test]
    fn test_paste_multiline_splits_paragraphs() {
        let mut surface = MemorySurface::new();
        let clipboard = MemoryClipboard::new().with_text("one\r\ntwo");

        sanitize_paste(&mut surface, &clipboard, None);

        assert_eq!(surface.content(), "<p>one</p><p>two</p>");
    }
}
