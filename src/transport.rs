//! Transport seam for cart requests.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::payload::CartRequest;

/// Errors raised while sending a request or reading its reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be sent or no reply arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// A reply arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Sends cart requests and returns the raw response body.
///
/// Implementations attach [`REQUEST_HEADERS`](crate::payload::REQUEST_HEADERS)
/// and post the encoded body to [`CartRequest::path`]. The reply body is
/// returned whatever the status code; the cart endpoints answer failures with
/// a JSON body too.
#[automock]
#[async_trait(?Send)]
pub trait CartTransport {
    /// Post `request` and return the response body text.
    async fn send(&self, request: &CartRequest, body: String) -> Result<String, TransportError>;
}
