//! Cart Forms prelude.
//!
//! Convenience exports for hosts wiring up the interceptor.

pub use crate::{
    capabilities::{Navigator, Notifier},
    interceptor::{
        CartFormInterceptor, InterceptorConfig, ResubmitPolicy, SubmitError, SubmitOutcome,
    },
    page::{CartForm, CartPage, SubmitEvent, SubmitFuture, SubmitListener, initialize},
    payload::{CartRequest, CartResponse, DEFAULT_FAILURE_MESSAGE, REQUEST_HEADERS},
    quantity::{Quantity, QuantityError, QuantityPolicy, parse_quantity},
    routes::{CartAction, FormKind, PRODUCT_ID_ATTRIBUTE, ProductId, QUANTITY_INPUT_SELECTOR},
    transport::{CartTransport, TransportError},
};
