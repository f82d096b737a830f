//! Browser binding for the cart form interceptor.
//!
//! Loaded as a WebAssembly module on the cart page. Once the document has been
//! parsed it binds every `.cart-update-form` and `.cart-remove-form`, posts
//! their submissions with `fetch` and reloads the page when each settles.

#[cfg(any(target_arch = "wasm32", test))]
mod control;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;
mod logging;
#[cfg(target_arch = "wasm32")]
mod window;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Module entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    use wasm_bindgen::{JsCast, closure::Closure};

    console_error_panic_hook::set_once();

    if let Err(error) = logging::init() {
        web_sys::console::warn_1(&format!("cart forms logging unavailable: {error}").into());
    }

    let Some(window) = web_sys::window() else {
        return;
    };

    let Some(document) = window.document() else {
        tracing::error!("cart forms loaded without a document");
        return;
    };

    if document.ready_state() != "loading" {
        install(window, document);
        return;
    }

    let target = document.clone();
    let callback = Closure::once_into_js(move || install(window, document));

    if let Err(error) =
        target.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        tracing::error!("failed to wait for DOMContentLoaded: {error:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn install(window: web_sys::Window, document: web_sys::Document) {
    use std::rc::Rc;

    use cart_forms::{interceptor::CartFormInterceptor, page::initialize};

    let browser = window::BrowserWindow::new(window.clone());
    let interceptor = Rc::new(CartFormInterceptor::new(
        fetch::FetchTransport::new(window),
        browser.clone(),
        browser,
    ));

    let bound = initialize(&dom::DocumentPage::new(document), &interceptor);

    tracing::info!(bound, "cart forms ready");
}
