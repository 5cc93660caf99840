//! WASM bindings for the newsdesk rich-text editor.
//!
//! Provides an embeddable editor component for the admin news feed form.

mod editor;
mod types;

pub use editor::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::filter::Targets;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );
    let filter = Targets::new()
        .with_target("newsdesk", console_level)
        .with_default(Level::WARN);

    // Another bundle on the page may already own the global subscriber.
    let _ = set_global_default(Registry::default().with(filter).with(wasm_layer));
}
