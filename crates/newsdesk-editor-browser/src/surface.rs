//! `contenteditable` element as an [`EditSurface`].
//!
//! Formatting goes through the document's command API (`execCommand` /
//! `queryCommandState`), so the browser owns selection, undo and markup.

use newsdesk_editor_core::{Capability, EditSurface, EditorConfig, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, HtmlElement};

/// Class set on the surface while it has no content.
pub const EMPTY_CLASS: &str = "is-empty";
/// Class identifying editor surfaces.
pub const SURFACE_CLASS: &str = "newsdesk-editor";

pub(crate) fn js_error(context: &str, err: JsValue) -> PlatformError {
    PlatformError(format!("{context}: {err:?}"))
}

pub struct BrowserSurface {
    element: HtmlElement,
    document: HtmlDocument,
}

impl BrowserSurface {
    /// Make `element` editable and apply config attributes.
    pub fn attach(element: HtmlElement, config: &EditorConfig) -> Result<Self, PlatformError> {
        let document = element
            .owner_document()
            .ok_or_else(|| PlatformError::from("element has no owner document"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| PlatformError::from("owner document is not an HTML document"))?;

        element.set_content_editable("true");
        let attrs = [
            ("role", "textbox"),
            ("aria-multiline", "true"),
            ("data-placeholder", config.placeholder.as_str()),
        ];
        for (name, value) in attrs {
            element
                .set_attribute(name, value)
                .map_err(|e| js_error("set_attribute", e))?;
        }
        if let Some(id) = &config.id {
            element.set_id(id);
        }
        element
            .class_list()
            .add_1(SURFACE_CLASS)
            .map_err(|e| js_error("classList.add", e))?;

        // Tag-based markup (<b>, not <span style>), paragraphs on Enter.
        for (command, value) in [("styleWithCSS", "false"), ("defaultParagraphSeparator", "p")] {
            if let Err(e) = document.exec_command_with_show_ui_and_value(command, false, value) {
                tracing::debug!(target: "newsdesk::surface", command, "document setup command failed: {:?}", e);
            }
        }

        Ok(Self { element, document })
    }

    /// Stop editing and hand the element back.
    pub fn detach(self) -> HtmlElement {
        self.element.set_content_editable("false");
        let _ = self.element.class_list().remove_2(SURFACE_CLASS, EMPTY_CLASS);
        self.element
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    /// Toggle [`EMPTY_CLASS`] so CSS can show `data-placeholder`.
    pub fn sync_placeholder(&self) {
        let empty = self.content().is_empty();
        if let Err(e) = self.element.class_list().toggle_with_force(EMPTY_CLASS, empty) {
            tracing::debug!(target: "newsdesk::surface", "placeholder toggle failed: {:?}", e);
        }
    }

    /// Whether the document selection is anchored inside this surface.
    pub fn owns_selection(&self) -> bool {
        let anchor = self
            .document
            .get_selection()
            .ok()
            .flatten()
            .and_then(|sel| sel.anchor_node());
        anchor.is_some_and(|node| self.element.contains(Some(&node)))
    }

    fn insert_at_selection(&self, text: &str) -> Result<(), PlatformError> {
        let selection = self
            .document
            .get_selection()
            .map_err(|e| js_error("getSelection", e))?
            .ok_or_else(|| PlatformError::from("no selection"))?;
        if selection.range_count() == 0 {
            return Err(PlatformError::from("no selection range"));
        }
        let range = selection
            .get_range_at(0)
            .map_err(|e| js_error("getRangeAt", e))?;
        range
            .delete_contents()
            .map_err(|e| js_error("deleteContents", e))?;
        let node = self.document.create_text_node(text);
        range
            .insert_node(&node)
            .map_err(|e| js_error("insertNode", e))?;
        range
            .set_start_after(&node)
            .map_err(|e| js_error("setStartAfter", e))?;
        range.collapse_with_to_start(true);
        selection
            .remove_all_ranges()
            .and_then(|_| selection.add_range(&range))
            .map_err(|e| js_error("addRange", e))
    }
}

/// Markup browsers leave behind in an emptied editable element.
pub fn is_blank_markup(markup: &str) -> bool {
    matches!(
        markup.trim(),
        "" | "<br>" | "<p><br></p>" | "<div><br></div>"
    )
}

impl EditSurface for BrowserSurface {
    fn exec_command(
        &mut self,
        capability: Capability,
        argument: Option<&str>,
    ) -> Result<bool, PlatformError> {
        self.document
            .exec_command_with_show_ui_and_value(capability.command_id(), false, argument.unwrap_or(""))
            .map_err(|e| js_error(capability.command_id(), e))
    }

    fn query_state(&self, capability: Capability) -> Result<bool, PlatformError> {
        self.document
            .query_command_state(capability.command_id())
            .map_err(|e| js_error(capability.command_id(), e))
    }

    fn content(&self) -> String {
        let markup = self.element.inner_html();
        if is_blank_markup(&markup) {
            String::new()
        } else {
            markup
        }
    }

    fn set_content(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
        self.sync_placeholder();
    }

    fn insert_plain_text(&mut self, text: &str) -> Result<(), PlatformError> {
        match self
            .document
            .exec_command_with_show_ui_and_value("insertText", false, text)
        {
            Ok(true) => Ok(()),
            Ok(false) => self.insert_at_selection(text),
            Err(e) => {
                tracing::debug!(target: "newsdesk::surface", "insertText failed, using range insert: {:?}", e);
                self.insert_at_selection(text)
            }
        }
    }

    fn focus(&mut self) {
        if let Err(e) = self.element.focus() {
            tracing::debug!(target: "newsdesk::surface", "focus failed: {:?}", e);
        }
    }

    fn has_focus(&self) -> bool {
        self.document
            .active_element()
            .is_some_and(|active| self.element.contains(Some(active.as_ref())))
    }
}
