//! newsdesk-editor-core: rich-text editor logic without framework dependencies.
//!
//! This crate provides:
//! - `EditSurface` trait abstracting the host's editable region
//! - `RichTextEditor<S>` - command dispatch, format tracking, value sync
//! - `Toolbar` - button list, grouping, pressed state, accelerators
//! - `MemorySurface` - in-process surface for headless hosts and tests
//! - Wire types for the newsfeed update endpoint

pub mod actions;
pub mod capability;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod paste;
pub mod platform;
pub mod snapshot;
pub mod toolbar;
pub mod tracker;
pub mod types;
pub mod wire;

pub use actions::{Key, KeyCombo, KeydownResult, Modifiers};
pub use capability::{Capability, Command};
pub use config::{EditorConfig, RefreshPolicy};
pub use controller::{ChangeCallback, SurfaceController, SyncOutcome};
pub use dispatch::dispatch_command;
pub use editor::RichTextEditor;
pub use error::EditorError;
pub use lifecycle::{EditorPhase, PhaseEvent};
pub use memory::{MemoryClipboard, MemorySurface};
pub use paste::{PasteOutcome, normalize_plain_text, sanitize_paste};
pub use platform::{ClipboardPlatform, EditSurface, PlatformError};
pub use smol_str::SmolStr;
pub use snapshot::FormatSnapshot;
pub use toolbar::{Toolbar, ToolbarButton, ToolbarGroup, ToolbarItem};
pub use tracker::{FormatTracker, SnapshotListener, SubscriberId};
pub use types::Selection;
pub use wire::{ApiResponse, PendingUpload, UpdateRequest, newsfeed_update_path};
