//! Native host for the cart form interceptor.
//!
//! Drives the same submission flow a browser page runs, against a live shop
//! server, using `reqwest` for transport and the terminal for alerts.

pub mod config;
pub mod http;
pub mod observability;
pub mod terminal;
