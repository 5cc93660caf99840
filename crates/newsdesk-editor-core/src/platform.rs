//! Platform abstraction traits for the host text-editing surface.
//!
//! The editor never owns a parsed document. Everything it knows about the
//! content comes from these traits, which the browser layer implements on top
//! of a `contenteditable` element and which [`MemorySurface`](crate::MemorySurface)
//! implements in-process for headless hosts and tests.

use thiserror::Error;

use crate::capability::Capability;

/// Error type for platform operations.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// The host-provided editable region.
///
/// Implementations store and render the rich content. The editor treats them
/// as a black box it can command and query:
///
/// - formatting goes through [`exec_command`](EditSurface::exec_command), whose
///   result is advisory only (hosts routinely accept a command and do nothing)
/// - active state comes from [`query_state`](EditSurface::query_state), which
///   may fail for some capabilities outside specific contexts
/// - content moves in and out as serialized markup
pub trait EditSurface {
    /// Issue a formatting command against the current selection.
    ///
    /// Returns whether the host reports having applied it. Callers must not
    /// rely on the value: a `true` does not guarantee a visible change.
    fn exec_command(
        &mut self,
        capability: Capability,
        argument: Option<&str>,
    ) -> Result<bool, PlatformError>;

    /// Whether `capability` is active at the current caret/selection.
    fn query_state(&self, capability: Capability) -> Result<bool, PlatformError>;

    /// Serialize the live content.
    fn content(&self) -> String;

    /// Replace the live content wholesale.
    fn set_content(&mut self, markup: &str);

    /// Insert plain text at the selection, replacing any selected content.
    fn insert_plain_text(&mut self, text: &str) -> Result<(), PlatformError>;

    /// Move input focus to the surface.
    fn focus(&mut self);

    /// Whether the surface currently holds input focus.
    fn has_focus(&self) -> bool;
}

/// Platform clipboard read access for paste handling.
///
/// Only the plain-text flavor is exposed. Rich flavors (HTML, RTF, custom
/// MIME types) are deliberately unreachable from the editor.
pub trait ClipboardPlatform {
    /// Read the plain-text flavor of the clipboard payload, if any.
    fn read_text(&self) -> Option<String>;
}
