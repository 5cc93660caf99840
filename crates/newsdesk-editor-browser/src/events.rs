//! Browser event handling for the editor.
//!
//! Converts DOM events into core types and installs the listeners an editor
//! instance needs. Listeners are `gloo_events::EventListener` guards: dropping
//! one removes it from its target.

use gloo_events::{EventListener, EventListenerOptions};
use newsdesk_editor_core::{Key, KeyCombo, Modifiers};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Event, EventTarget, KeyboardEvent};

/// Build a [`KeyCombo`] from a keydown event.
pub fn key_combo_from_event(evt: &KeyboardEvent) -> KeyCombo {
    KeyCombo::with_modifiers(
        Key::from_key_value(&evt.key()),
        Modifiers {
            ctrl: evt.ctrl_key(),
            alt: evt.alt_key(),
            shift: evt.shift_key(),
            meta: evt.meta_key(),
        },
    )
}

/// Check if the keydown is part of an IME composition.
pub fn is_composing(evt: &KeyboardEvent) -> bool {
    // Safari reports composition-ending Enter as keyCode 229.
    evt.is_composing() || evt.key_code() == 229
}

/// Keydown listener that may call `prevent_default`.
pub fn on_keydown<F>(target: &EventTarget, mut handler: F) -> EventListener
where
    F: FnMut(&KeyboardEvent) + 'static,
{
    EventListener::new_with_options(
        target,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if let Some(evt) = event.dyn_ref::<KeyboardEvent>() {
                handler(evt);
            }
        },
    )
}

/// Paste listener that may call `prevent_default`.
pub fn on_paste<F>(target: &EventTarget, mut handler: F) -> EventListener
where
    F: FnMut(&ClipboardEvent) + 'static,
{
    EventListener::new_with_options(
        target,
        "paste",
        EventListenerOptions::enable_prevent_default(),
        move |event| match event.dyn_ref::<ClipboardEvent>() {
            Some(evt) => handler(evt),
            None => tracing::warn!(target: "newsdesk::events", "[PASTE] Failed to cast to ClipboardEvent"),
        },
    )
}

/// Listener for `input`, fired after the browser mutated the surface.
pub fn on_input<F>(target: &EventTarget, handler: F) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new(target, "input", handler)
}

/// Document-wide `selectionchange` subscription.
///
/// The event fires for every selection on the page; the callback decides
/// whether it concerns this editor.
pub struct SelectionChangeListener {
    _listener: EventListener,
}

impl SelectionChangeListener {
    pub fn new<F>(document: &web_sys::Document, mut callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let listener = EventListener::new(document, "selectionchange", move |_| callback());
        Self {
            _listener: listener,
        }
    }
}
