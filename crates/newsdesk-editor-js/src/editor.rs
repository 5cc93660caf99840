//! JsEditor - the editor wrapper for JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlInputElement};

use newsdesk_editor_browser::{
    BrowserClipboard, BrowserSurface, SelectionChangeListener, ToolbarView, is_composing,
    key_combo_from_event, on_input, on_keydown, on_paste, platform,
};
use newsdesk_editor_core::{
    ApiResponse, EditSurface, EditorConfig, EditorError, KeydownResult, PendingUpload, RichTextEditor,
    UpdateRequest,
};

use crate::types::{EditorOptions, JsSyncOutcome, JsUpdateRequest};

type InnerEditor = RichTextEditor<BrowserSurface>;

fn js_error(err: EditorError) -> JsError {
    JsError::new(&err.to_string())
}

fn dom_error(context: &str, err: JsValue) -> JsError {
    JsError::new(&format!("{context}: {err:?}"))
}

/// Serialize maps as plain objects rather than `Map`.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// State shared between the wrapper and its DOM listeners.
struct Shared {
    editor: RefCell<InnerEditor>,
    /// Values emitted while the editor was borrowed, delivered afterwards.
    outbox: Rc<RefCell<Vec<String>>>,
    on_change: RefCell<Option<js_sys::Function>>,
    hidden_input: Option<HtmlInputElement>,
}

impl Shared {
    /// Run `f` against the editor unless an operation is already running.
    ///
    /// Browsers fire `input` and `selectionchange` synchronously from inside
    /// `execCommand`; those land here while the editor is borrowed and are
    /// skipped, since the outer operation serializes and refreshes anyway.
    fn with_editor<R>(&self, f: impl FnOnce(&mut InnerEditor) -> R) -> Option<R> {
        let result = match self.editor.try_borrow_mut() {
            Ok(mut editor) => {
                let result = f(&mut editor);
                editor.surface().sync_placeholder();
                self.sync_form_input(&editor);
                Some(result)
            }
            Err(_) => {
                tracing::trace!(target: "newsdesk::js", "editor busy, skipping nested event");
                None
            }
        };
        self.flush();
        result
    }

    /// Keep the hidden form field on the surface's current value, reseeds included.
    fn sync_form_input(&self, editor: &InnerEditor) {
        if let Some(input) = &self.hidden_input {
            input.set_value(&editor.value());
        }
    }

    /// Deliver queued change notifications. Callbacks may re-enter the editor.
    fn flush(&self) {
        let pending = std::mem::take(&mut *self.outbox.borrow_mut());
        if pending.is_empty() {
            return;
        }
        let callback = self.on_change.borrow().clone();
        let Some(callback) = callback else {
            return;
        };
        for value in pending {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&value)) {
                tracing::warn!(target: "newsdesk::js", "onChange threw: {:?}", e);
            }
        }
    }
}

/// Everything owned by a mount. Dropping it detaches listeners and DOM.
struct Mounted {
    shared: Rc<Shared>,
    root: HtmlElement,
    _toolbar: Rc<ToolbarView>,
    _listeners: Vec<EventListener>,
    _selection: SelectionChangeListener,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Ok(mut editor) = self.shared.editor.try_borrow_mut() {
            editor.clear_on_change();
        }
        self.root.remove();
        tracing::debug!(target: "newsdesk::js", "editor unmounted");
    }
}

/// The editor instance exposed to JavaScript.
///
/// Methods reachable from inside `onChange` take `&self`, so a callback may
/// call back into the editor while the triggering call is still on the stack.
#[wasm_bindgen]
pub struct JsEditor {
    config: RefCell<EditorConfig>,
    uploads: RefCell<PendingUpload>,
    mounted: Option<Mounted>,
}

impl JsEditor {
    fn with_config(config: EditorConfig) -> Self {
        Self {
            config: RefCell::new(config),
            uploads: RefCell::new(PendingUpload::new()),
            mounted: None,
        }
    }
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor from options (`value`, `placeholder`, `name`, `id`, ...).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsEditor, JsError> {
        let config = if options.is_undefined() || options.is_null() {
            EditorConfig::default()
        } else {
            let opts: EditorOptions = serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
            opts.into()
        };
        Ok(Self::with_config(config))
    }

    // === Mounting ===

    /// Mount the editor into a container element.
    ///
    /// Creates the toolbar and a contenteditable surface inside the container.
    /// `onChange` receives the serialized markup after each edit.
    #[wasm_bindgen]
    pub fn mount(
        &mut self,
        container: &HtmlElement,
        on_change: Option<js_sys::Function>,
    ) -> Result<(), JsError> {
        self.unmount();
        let config = self.config.get_mut().clone();

        let document = container
            .owner_document()
            .ok_or_else(|| JsError::new("No document"))?;
        let create = |tag: &str| -> Result<HtmlElement, JsError> {
            document
                .create_element(tag)
                .map_err(|e| dom_error("Failed to create element", e))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| JsError::new("Created element is not an HtmlElement"))
        };

        let root = create("div")?;
        root.set_class_name("newsdesk-editor-root");
        let surface_el = create("div")?;

        let hidden_input = match config.field_name() {
            Some(name) => {
                let input = create("input")?
                    .dyn_into::<HtmlInputElement>()
                    .map_err(|_| JsError::new("Created input is not an HtmlInputElement"))?;
                input.set_type("hidden");
                input.set_name(name);
                Some(input)
            }
            None => None,
        };

        let surface = BrowserSurface::attach(surface_el.clone(), &config)
            .map_err(|e| js_error(e.into()))?;
        let mut editor = RichTextEditor::mount(surface, config);
        editor.surface().sync_placeholder();
        if let Some(input) = &hidden_input {
            input.set_value(&editor.value());
        }

        let outbox = Rc::new(RefCell::new(Vec::new()));
        let sink = outbox.clone();
        editor.set_on_change(move |value| sink.borrow_mut().push(value.to_string()));

        let is_mac = platform().uses_meta();
        let shared = Rc::new(Shared {
            editor: RefCell::new(editor),
            outbox,
            on_change: RefCell::new(on_change),
            hidden_input: hidden_input.clone(),
        });

        let toolbar = {
            let weak = Rc::downgrade(&shared);
            let editor = shared.editor.borrow();
            ToolbarView::render(
                &document,
                editor.toolbar(),
                &editor.snapshot(),
                is_mac,
                move |index| {
                    if let Some(shared) = weak.upgrade() {
                        shared.with_editor(|editor| editor.activate_button(index));
                    }
                },
            )
            .map_err(|e| js_error(e.into()))?
        };
        let toolbar = Rc::new(toolbar);
        {
            let view = toolbar.clone();
            shared
                .editor
                .borrow_mut()
                .subscribe(move |snapshot| view.update(snapshot));
        }

        let mut listeners = Vec::new();
        {
            let weak = Rc::downgrade(&shared);
            listeners.push(on_keydown(&surface_el, move |evt| {
                if is_composing(evt) {
                    return;
                }
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let combo = key_combo_from_event(evt);
                let handled = shared.with_editor(|editor| editor.handle_keydown(&combo, is_mac));
                if handled == Some(KeydownResult::Handled) {
                    evt.prevent_default();
                }
            }));
        }
        {
            let weak = Rc::downgrade(&shared);
            listeners.push(on_input(&surface_el, move |_| {
                if let Some(shared) = weak.upgrade() {
                    shared.with_editor(|editor| editor.on_input());
                }
            }));
        }
        {
            let weak = Rc::downgrade(&shared);
            listeners.push(on_paste(&surface_el, move |evt| {
                evt.prevent_default();
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let clipboard = BrowserClipboard::from_event(evt);
                shared.with_editor(|editor| editor.paste(&clipboard));
            }));
        }
        let selection = {
            let weak = Rc::downgrade(&shared);
            SelectionChangeListener::new(&document, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.with_editor(|editor| editor.on_selection_change());
                }
            })
        };

        root.append_child(toolbar.element())
            .map_err(|e| dom_error("Failed to append toolbar", e))?;
        root.append_child(&surface_el)
            .map_err(|e| dom_error("Failed to append surface", e))?;
        if let Some(input) = &hidden_input {
            root.append_child(input)
                .map_err(|e| dom_error("Failed to append input", e))?;
        }
        container
            .append_child(&root)
            .map_err(|e| dom_error("Failed to append child", e))?;

        self.mounted = Some(Mounted {
            shared,
            root,
            _toolbar: toolbar,
            _listeners: listeners,
            _selection: selection,
        });
        tracing::debug!(target: "newsdesk::js", "editor mounted");
        Ok(())
    }

    /// Check if the editor is mounted.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Unmount the editor and clean up. Keeps the last value.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            if let Ok(editor) = mounted.shared.editor.try_borrow() {
                self.config.get_mut().value = editor.value();
            }
        }
    }

    /// Replace the change callback.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, on_change: Option<js_sys::Function>) {
        if let Some(mounted) = &self.mounted {
            *mounted.shared.on_change.borrow_mut() = on_change;
        }
    }

    // === Value ===

    /// Current serialized markup.
    #[wasm_bindgen(js_name = getValue)]
    pub fn get_value(&self) -> String {
        self.mounted
            .as_ref()
            .and_then(|m| m.shared.editor.try_borrow().ok().map(|e| e.value()))
            .unwrap_or_else(|| self.config.borrow().value.clone())
    }

    /// Push a new `value` prop. Ignored while newer local edits exist.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: &str) -> JsSyncOutcome {
        self.config.borrow_mut().value = value.to_string();
        match &self.mounted {
            Some(mounted) => mounted
                .shared
                .with_editor(|editor| editor.set_value(value).into())
                .unwrap_or(JsSyncOutcome::Deferred),
            None => JsSyncOutcome::Reseeded,
        }
    }

    /// Replace the content unconditionally, discarding local edits.
    #[wasm_bindgen]
    pub fn reset(&self, value: &str) -> JsSyncOutcome {
        self.config.borrow_mut().value = value.to_string();
        *self.uploads.borrow_mut() = PendingUpload::new();
        match &self.mounted {
            Some(mounted) => mounted
                .shared
                .with_editor(|editor| editor.reset(value).into())
                .unwrap_or(JsSyncOutcome::Deferred),
            None => JsSyncOutcome::Reseeded,
        }
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.get_value().is_empty()
    }

    // === Commands ===

    /// Run a formatting command by name (`"bold"`, `"justifyCenter"`, ...).
    #[wasm_bindgen]
    pub fn execute(&self, command: &str, argument: Option<String>) -> Result<(), JsError> {
        let mounted = self
            .mounted
            .as_ref()
            .ok_or_else(|| JsError::new("Editor is not mounted"))?;
        mounted
            .shared
            .with_editor(|editor| editor.execute_named(command, argument.as_deref()))
            .unwrap_or(Ok(()))
            .map_err(js_error)
    }

    /// Current format snapshot as `{ bold: bool, italic: bool, ... }`.
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> Result<JsValue, JsError> {
        let mounted = self
            .mounted
            .as_ref()
            .ok_or_else(|| JsError::new("Editor is not mounted"))?;
        let snapshot = mounted
            .shared
            .editor
            .try_borrow()
            .map_err(|_| JsError::new("Editor is busy"))?
            .snapshot();
        to_js(&snapshot)
    }

    /// Focus the editor.
    #[wasm_bindgen]
    pub fn focus(&self) {
        if let Some(mounted) = &self.mounted {
            mounted
                .shared
                .with_editor(|editor| editor.surface_mut().focus());
        }
    }

    // === Submission ===

    /// Record asset URLs reported by the upload widget.
    #[wasm_bindgen(js_name = onUploadSuccess)]
    pub fn on_upload_success(&self, urls: Vec<String>) {
        self.uploads.borrow_mut().on_upload_success(urls);
    }

    /// Build the update request for news feed entry `id`.
    ///
    /// The markup goes under the configured field name; uploaded URLs are
    /// merged into `uploadsField` when given.
    #[wasm_bindgen(js_name = buildUpdateRequest)]
    pub fn build_update_request(
        &self,
        id: &str,
        uploads_field: Option<String>,
    ) -> Result<JsUpdateRequest, JsError> {
        let field = self
            .config
            .borrow()
            .field_name()
            .map(str::to_string)
            .ok_or_else(|| js_error(EditorError::Config("editor has no name or id".into())))?;
        let mut request = UpdateRequest::new(id).markup(field, &self.get_value());
        if let Some(uploads_field) = uploads_field {
            request = request
                .uploads(uploads_field, &self.uploads.borrow())
                .map_err(js_error)?;
        }
        Ok(JsUpdateRequest {
            method: request.method().to_string(),
            path: request.path(),
            body: request.to_json().map_err(js_error)?,
        })
    }

    /// Decode an endpoint reply. Throws with the server message on failure.
    #[wasm_bindgen(js_name = parseResponse)]
    pub fn parse_response(json: &str) -> Result<JsValue, JsError> {
        let response: ApiResponse = ApiResponse::from_json(json).map_err(js_error)?;
        match response.into_result().map_err(js_error)? {
            Some(data) => to_js(&data),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}
