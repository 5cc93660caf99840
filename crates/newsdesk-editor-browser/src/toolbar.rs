//! DOM toolbar bound to the core [`Toolbar`] model.

use gloo_events::{EventListener, EventListenerOptions};
use newsdesk_editor_core::{Capability, FormatSnapshot, PlatformError, Toolbar, ToolbarItem};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::surface::js_error;

pub const TOOLBAR_CLASS: &str = "newsdesk-toolbar";
pub const BUTTON_CLASS: &str = "newsdesk-toolbar-button";
pub const SEPARATOR_CLASS: &str = "newsdesk-toolbar-separator";
pub const ACTIVE_CLASS: &str = "active";

/// Rendered toolbar. Dropping it removes the click listeners; the element
/// itself stays until removed from the DOM.
pub struct ToolbarView {
    root: HtmlElement,
    buttons: Vec<(Capability, HtmlElement)>,
    _listeners: Vec<EventListener>,
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, PlatformError> {
    document
        .create_element(tag)
        .map_err(|e| js_error("createElement", e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PlatformError(format!("<{tag}> is not an HtmlElement")))
}

fn set_attrs(element: &HtmlElement, attrs: &[(&str, &str)]) -> Result<(), PlatformError> {
    for (name, value) in attrs {
        element
            .set_attribute(name, value)
            .map_err(|e| js_error("setAttribute", e))?;
    }
    Ok(())
}

impl ToolbarView {
    /// Build the toolbar element. `on_activate` receives the button index.
    ///
    /// Buttons act on `mousedown` with default prevented, so the surface keeps
    /// its selection.
    pub fn render<F>(
        document: &Document,
        toolbar: &Toolbar,
        snapshot: &FormatSnapshot,
        is_mac: bool,
        on_activate: F,
    ) -> Result<Self, PlatformError>
    where
        F: Fn(usize) + Clone + 'static,
    {
        let root = create(document, "div")?;
        root.set_class_name(TOOLBAR_CLASS);
        set_attrs(&root, &[("role", "toolbar")])?;

        let mut buttons = Vec::new();
        let mut listeners = Vec::new();
        for item in toolbar.render(snapshot) {
            let element = match item {
                ToolbarItem::Separator => {
                    let sep = create(document, "span")?;
                    sep.set_class_name(SEPARATOR_CLASS);
                    set_attrs(&sep, &[("role", "separator")])?;
                    sep
                }
                ToolbarItem::Button { index, button: model, active } => {
                    let button = create(document, "button")?;
                    button.set_class_name(BUTTON_CLASS);
                    button.set_text_content(Some(model.icon));
                    button.set_title(&model.tooltip(is_mac));
                    set_attrs(
                        &button,
                        &[
                            ("type", "button"),
                            ("aria-label", model.title),
                            ("data-command", model.command.capability.name()),
                        ],
                    )?;
                    set_pressed(&button, active);

                    let on_activate = on_activate.clone();
                    listeners.push(EventListener::new_with_options(
                        &button,
                        "mousedown",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            event.prevent_default();
                            on_activate(index);
                        },
                    ));
                    buttons.push((model.command.capability, button.clone()));
                    button
                }
            };
            root.append_child(&element)
                .map_err(|e| js_error("appendChild", e))?;
        }

        Ok(Self {
            root,
            buttons,
            _listeners: listeners,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.root
    }

    /// Reflect `snapshot` in the pressed state of every button.
    pub fn update(&self, snapshot: &FormatSnapshot) {
        for (capability, button) in &self.buttons {
            set_pressed(button, snapshot.is_active(*capability));
        }
    }

    /// Detach from the DOM.
    pub fn remove(self) {
        self.root.remove();
    }
}

fn set_pressed(button: &HtmlElement, active: bool) {
    let _ = button.class_list().toggle_with_force(ACTIVE_CLASS, active);
    let _ = button.set_attribute("aria-pressed", if active { "true" } else { "false" });
}
