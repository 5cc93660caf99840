//! Types exposed to JavaScript via wasm-bindgen.

use newsdesk_editor_core::{EditorConfig, RefreshPolicy, SyncOutcome};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Editor props, as passed by the admin form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    pub value: String,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[tsify(type = "\"focusedOnly\" | \"always\"")]
    pub refresh_policy: RefreshPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paste_chars: Option<usize>,
}

impl From<EditorOptions> for EditorConfig {
    fn from(opts: EditorOptions) -> Self {
        EditorConfig {
            value: opts.value,
            placeholder: opts.placeholder,
            name: opts.name,
            id: opts.id,
            refresh_policy: opts.refresh_policy,
            max_paste_chars: opts.max_paste_chars,
        }
    }
}

/// Request ready to hand to `fetch`.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsUpdateRequest {
    pub method: String,
    pub path: String,
    /// JSON-encoded body.
    pub body: String,
}

/// Result of pushing a new `value` prop into a mounted editor.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsSyncOutcome {
    Unchanged,
    Reseeded,
    /// Local edits were newer; the value was not applied.
    Deferred,
}

impl From<SyncOutcome> for JsSyncOutcome {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Unchanged => JsSyncOutcome::Unchanged,
            SyncOutcome::Reseeded => JsSyncOutcome::Reseeded,
            SyncOutcome::Deferred => JsSyncOutcome::Deferred,
        }
    }
}
