//! Cart Forms
//!
//! Intercepts the update and remove forms of a shopping-cart page, posts each
//! submission to the cart endpoints as JSON and reloads the page once the
//! server has answered.
//!
//! The crate is host-agnostic: the page, the HTTP transport, the reload and
//! the alert are all supplied by the caller through the traits in [`page`],
//! [`transport`] and [`capabilities`].

pub mod capabilities;
pub mod interceptor;
pub mod page;
pub mod payload;
pub mod prelude;
pub mod quantity;
pub mod routes;
pub mod transport;
