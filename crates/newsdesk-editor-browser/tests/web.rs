//! WASM browser tests for newsdesk-editor-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use newsdesk_editor_browser::{
    BrowserClipboard, BrowserSurface, Capability, ClipboardPlatform, EditSurface, EditorConfig,
    FormatSnapshot, Key, KeyCombo, Modifiers, Platform, RichTextEditor, SelectionChangeListener,
    Toolbar, ToolbarView, key_combo_from_event, on_paste, platform,
};
use web_sys::{
    ClipboardEvent, ClipboardEventInit, DataTransfer, Event, HtmlElement, KeyboardEvent,
    KeyboardEventInit,
};

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn make_element() -> HtmlElement {
    let doc = document();
    let el: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

fn select_contents(el: &HtmlElement) {
    let doc = document();
    let range = doc.create_range().unwrap();
    range.select_node_contents(el).unwrap();
    let sel = doc.get_selection().unwrap().unwrap();
    sel.remove_all_ranges().unwrap();
    sel.add_range(&range).unwrap();
}

fn caret_at_end(el: &HtmlElement) {
    let doc = document();
    let range = doc.create_range().unwrap();
    range.select_node_contents(el).unwrap();
    range.collapse_with_to_start(false);
    let sel = doc.get_selection().unwrap().unwrap();
    sel.remove_all_ranges().unwrap();
    sel.add_range(&range).unwrap();
}

// === Platform detection tests ===

#[wasm_bindgen_test]
fn test_platform_detection() {
    // Actual values depend on the browser running the test.
    let plat = platform();
    let _ = plat.uses_meta();
}

#[wasm_bindgen_test]
fn test_platform_from_strings() {
    let mac = Platform::from_strings(
        "mozilla/5.0 (macintosh; intel mac os x 10_15_7) applewebkit/605.1.15 (khtml, like gecko) version/17.0 safari/605.1.15",
        "macintel",
    );
    assert!(mac.mac && mac.uses_meta());

    let ipad = Platform::from_strings(
        "mozilla/5.0 (ipad; cpu os 17_0 like mac os x) applewebkit/605.1.15 (khtml, like gecko) mobile/15e148",
        "macintel",
    );
    assert!(ipad.ios && !ipad.mac && ipad.uses_meta());

    let linux = Platform::from_strings(
        "mozilla/5.0 (x11; linux x86_64; rv:128.0) gecko/20100101 firefox/128.0",
        "linux x86_64",
    );
    assert!(!linux.uses_meta());
}

// === Surface tests ===

#[wasm_bindgen_test]
fn test_attach_sets_attributes() {
    let el = make_element();
    let config = EditorConfig::default()
        .with_placeholder("Write the story…")
        .with_id("description");
    let surface = BrowserSurface::attach(el.clone(), &config).unwrap();

    assert_eq!(el.content_editable(), "true");
    assert_eq!(el.id(), "description");
    assert_eq!(el.get_attribute("data-placeholder").as_deref(), Some("Write the story…"));
    assert_eq!(el.get_attribute("role").as_deref(), Some("textbox"));

    surface.sync_placeholder();
    assert!(el.class_list().contains("is-empty"));

    let el = surface.detach();
    assert_eq!(el.content_editable(), "false");
    el.remove();
}

#[wasm_bindgen_test]
fn test_content_round_trip_and_blank_normalization() {
    let el = make_element();
    let mut surface = BrowserSurface::attach(el.clone(), &EditorConfig::default()).unwrap();

    surface.set_content("<p>hello</p>");
    assert_eq!(surface.content(), "<p>hello</p>");
    assert!(!el.class_list().contains("is-empty"));

    el.set_inner_html("<p><br></p>");
    assert_eq!(surface.content(), "");
    el.remove();
}

#[wasm_bindgen_test]
fn test_bold_command_and_query() {
    let el = make_element();
    let mut surface = BrowserSurface::attach(el.clone(), &EditorConfig::default()).unwrap();
    surface.set_content("<p>hello</p>");
    surface.focus();
    select_contents(&el);

    assert!(surface.exec_command(Capability::Bold, None).unwrap());
    assert!(surface.query_state(Capability::Bold).unwrap());
    assert!(surface.content().contains("<b>hello</b>"));
    el.remove();
}

#[wasm_bindgen_test]
fn test_editor_mount_seeds_browser_surface() {
    let el = make_element();
    let surface = BrowserSurface::attach(el.clone(), &EditorConfig::default()).unwrap();
    let editor = RichTextEditor::mount(surface, EditorConfig::new("<p>seeded</p>"));

    assert_eq!(editor.value(), "<p>seeded</p>");
    assert_eq!(el.inner_html(), "<p>seeded</p>");
    editor.into_surface().detach().remove();
}

// === Event conversion tests ===

#[wasm_bindgen_test]
fn test_key_combo_from_event() {
    let init = KeyboardEventInit::new();
    init.set_key("B");
    init.set_ctrl_key(true);
    init.set_shift_key(true);
    let evt = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();

    let combo = key_combo_from_event(&evt);
    assert_eq!(
        combo,
        KeyCombo::with_modifiers(
            Key::character("b"),
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::NONE
            }
        )
    );
}

#[wasm_bindgen_test]
fn test_selection_listener_stops_after_drop() {
    let doc = document();
    let calls = Rc::new(Cell::new(0));
    let listener = {
        let calls = calls.clone();
        SelectionChangeListener::new(&doc, move || calls.set(calls.get() + 1))
    };

    doc.dispatch_event(&Event::new("selectionchange").unwrap())
        .unwrap();
    assert_eq!(calls.get(), 1);

    drop(listener);
    doc.dispatch_event(&Event::new("selectionchange").unwrap())
        .unwrap();
    assert_eq!(calls.get(), 1);
}

// === Paste tests ===

#[wasm_bindgen_test]
fn test_paste_inserts_plain_text_only() {
    let el = make_element();
    let surface = BrowserSurface::attach(el.clone(), &EditorConfig::default()).unwrap();
    let editor = Rc::new(RefCell::new(RichTextEditor::mount(
        surface,
        EditorConfig::new("<p>Lead: </p>"),
    )));
    let _listener = {
        let editor = editor.clone();
        on_paste(&el, move |evt| {
            evt.prevent_default();
            let clipboard = BrowserClipboard::from_event(evt);
            editor.borrow_mut().paste(&clipboard);
        })
    };
    editor.borrow_mut().surface_mut().focus();
    caret_at_end(&el);

    let data = DataTransfer::new().unwrap();
    data.set_data("text/html", r#"<h1 style="color: red">Breaking news</h1>"#)
        .unwrap();
    data.set_data("text/plain", "Breaking news").unwrap();
    let init = ClipboardEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_clipboard_data(Some(&data));
    let evt = ClipboardEvent::new_with_event_init_dict("paste", &init).unwrap();
    el.dispatch_event(&evt).unwrap();

    let markup = editor.borrow().value();
    assert!(!markup.contains("<h1"), "got {markup}");
    assert!(!markup.contains("style="), "got {markup}");
    assert!(markup.contains("Breaking news"), "got {markup}");
    assert!(evt.default_prevented());
    el.remove();
}

#[wasm_bindgen_test]
fn test_empty_clipboard_reads_nothing() {
    assert_eq!(BrowserClipboard::empty().read_text(), None);
}

// === Toolbar tests ===

#[wasm_bindgen_test]
fn test_toolbar_render_and_update() {
    let doc = document();
    let view = ToolbarView::render(
        &doc,
        &Toolbar::standard(),
        &FormatSnapshot::with_active(&[Capability::AlignLeft]),
        false,
        |_| {},
    )
    .unwrap();

    let root = view.element();
    assert_eq!(root.query_selector_all("button").unwrap().length(), 9);
    assert_eq!(
        root.query_selector_all(".newsdesk-toolbar-separator")
            .unwrap()
            .length(),
        2
    );

    let bold = root
        .query_selector("[data-command=bold]")
        .unwrap()
        .unwrap();
    assert_eq!(bold.get_attribute("title").as_deref(), Some("Bold (Ctrl+B)"));
    assert_eq!(bold.get_attribute("aria-pressed").as_deref(), Some("false"));

    view.update(&FormatSnapshot::with_active(&[Capability::Bold]));
    assert!(bold.class_list().contains("active"));
    assert_eq!(bold.get_attribute("aria-pressed").as_deref(), Some("true"));

    let left = root
        .query_selector("[data-command=alignLeft]")
        .unwrap()
        .unwrap();
    assert!(!left.class_list().contains("active"));
}
