//! `fetch` transport.

use async_trait::async_trait;
use cart_forms::{
    payload::{CartRequest, REQUEST_HEADERS},
    transport::{CartTransport, TransportError},
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response, Window};

/// Posts cart requests relative to the current page.
#[derive(Debug, Clone)]
pub(crate) struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl CartTransport for FetchTransport {
    async fn send(&self, request: &CartRequest, body: String) -> Result<String, TransportError> {
        let headers = Headers::new().map_err(request_error)?;

        for (name, value) in REQUEST_HEADERS {
            headers.set(name, value).map_err(request_error)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        let reply = JsFuture::from(self.window.fetch_with_str_and_init(&request.path(), &init))
            .await
            .map_err(request_error)?;

        let response = reply.dyn_into::<Response>().map_err(request_error)?;

        let text = JsFuture::from(response.text().map_err(body_error)?)
            .await
            .map_err(body_error)?;

        text.as_string()
            .ok_or_else(|| TransportError::Body("response text was not a string".to_string()))
    }
}

fn request_error(error: JsValue) -> TransportError {
    TransportError::Request(describe(&error))
}

fn body_error(error: JsValue) -> TransportError {
    TransportError::Body(describe(&error))
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
