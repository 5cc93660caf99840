//! Browser DOM layer for the newsdesk rich-text editor.
//!
//! Assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `surface`: `contenteditable` element driven through the command API
//! - `clipboard`: paste-event clipboard access (plain text only)
//! - `events`: keydown/input/paste/selectionchange listeners
//! - `toolbar`: DOM rendering of the core toolbar model
//! - `platform`: Browser/OS detection for Cmd vs Ctrl
//!
//! # Re-exports
//!
//! This crate re-exports `newsdesk-editor-core` for convenience, so consumers
//! only need to depend on `newsdesk-editor-browser`.

pub use newsdesk_editor_core;
pub use newsdesk_editor_core::*;

pub mod clipboard;
pub mod events;
pub mod platform;
pub mod surface;
pub mod toolbar;

pub use clipboard::BrowserClipboard;
pub use events::{
    SelectionChangeListener, is_composing, key_combo_from_event, on_input, on_keydown, on_paste,
};
pub use platform::{Platform, platform};
pub use surface::{BrowserSurface, is_blank_markup};
pub use toolbar::ToolbarView;
