//! Request and response bodies exchanged with the cart endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{quantity::Quantity, routes::CartAction};

/// Headers sent with every cart request.
pub const REQUEST_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("X-Requested-With", "XMLHttpRequest"),
];

/// Alert text used when a failed response carries no message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Unable to update cart.";

#[derive(Debug, Serialize)]
struct RequestBody {
    quantity: Quantity,
}

/// One outbound cart request.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRequest {
    /// Endpoint to post to.
    pub action: CartAction,

    /// Quantity carried in the body.
    pub quantity: Quantity,
}

impl CartRequest {
    /// Build a request for `action` carrying `quantity`.
    pub fn new(action: CartAction, quantity: Quantity) -> Self {
        Self { action, quantity }
    }

    /// Returns the request path, relative to the site root.
    pub fn path(&self) -> String {
        self.action.path()
    }

    /// Encode the JSON body, e.g. `{"quantity":3}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&RequestBody {
            quantity: self.quantity,
        })
    }
}

/// Parsed reply from a cart endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartResponse {
    /// Whether the server applied the change.
    pub success: bool,

    /// Human readable outcome, shown to the user on failure.
    #[serde(default)]
    pub message: Option<String>,

    /// Number of items in the cart after the change.
    ///
    /// Anything other than a non-negative integer is read as absent.
    #[serde(default, deserialize_with = "lenient_count")]
    pub cart_count: Option<u64>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value.as_ref().and_then(serde_json::Value::as_u64))
}

impl CartResponse {
    /// Parse a response body.
    ///
    /// A body that is not JSON, or whose shape does not match, is an error.
    ///
    /// # Errors
    ///
    /// Returns the decoding error from `serde_json`.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// The message to alert with, if the change was not applied.
    pub fn failure_message(&self) -> Option<&str> {
        if self.success {
            return None;
        }

        Some(
            self.message
                .as_deref()
                .filter(|message| !message.is_empty())
                .unwrap_or(DEFAULT_FAILURE_MESSAGE),
        )
    }
}
