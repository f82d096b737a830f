//! `web-sys` implementation of the cart page.

use cart_forms::page::{CartForm, CartPage, SubmitEvent, SubmitListener};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, Event};

use crate::control::ControlValue;

/// The live document.
#[derive(Debug, Clone)]
pub(crate) struct DocumentPage {
    document: Document,
}

impl DocumentPage {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }
}

impl CartPage for DocumentPage {
    type Form = FormElement;

    fn query_forms(&self, selector: &str) -> Vec<FormElement> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(error) => {
                error!(selector, "failed to query cart forms: {error:?}");
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| FormElement { element })
            .collect()
    }
}

/// A form element found on the page.
#[derive(Debug, Clone)]
pub(crate) struct FormElement {
    element: Element,
}

impl CartForm for FormElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn input_value(&self, selector: &str) -> Option<String> {
        let input = self.element.query_selector(selector).ok().flatten()?;

        // Any control exposing `value` counts, not only `<input>`.
        let value = js_sys::Reflect::get(&input, &JsValue::from_str("value"))
            .unwrap_or(JsValue::UNDEFINED);

        Some(ControlValue::from_js(&value).into_text())
    }

    fn on_submit(&self, listener: SubmitListener) {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let pending = listener(&BrowserEvent { event } as &dyn SubmitEvent);

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = pending.await;

                debug!(?outcome, "cart form submission settled");
            });
        });

        if let Err(error) = self
            .element
            .add_event_listener_with_callback("submit", callback.as_ref().unchecked_ref())
        {
            error!("failed to bind cart form: {error:?}");
            return;
        }

        // The listener lives as long as the page.
        callback.forget();
    }
}

struct BrowserEvent {
    event: Event,
}

impl SubmitEvent for BrowserEvent {
    fn prevent_default(&self) {
        self.event.prevent_default();
    }
}
