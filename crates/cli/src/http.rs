//! `reqwest` transport for the cart endpoints.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use cart_forms::{
    payload::{CartRequest, REQUEST_HEADERS},
    transport::{CartTransport, TransportError},
};

/// Posts cart requests to a shop server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: Client,
}

impl HttpTransport {
    /// Create a transport resolving cart paths against `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|error| TransportError::Request(format!("invalid cart path {path}: {error}")))
    }
}

#[async_trait(?Send)]
impl CartTransport for HttpTransport {
    async fn send(&self, request: &CartRequest, body: String) -> Result<String, TransportError> {
        let url = self.url(&request.path())?;

        let builder = REQUEST_HEADERS
            .iter()
            .fold(self.http.post(url.clone()), |builder, (name, value)| {
                builder.header(*name, *value)
            });

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;

        let status = response.status();

        debug!(%url, %status, "cart endpoint replied");

        response
            .text()
            .await
            .map_err(|error| TransportError::Body(error.to_string()))
    }
}
