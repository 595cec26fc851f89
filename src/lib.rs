//! IoT Ack
//!
//! A minimal HTTP service accepting telemetry messages from IoT devices. Each submission is
//! acknowledged with the message itself, a count of every message accepted since the process
//! started, and the device identifier carried by the client's bearer token (if any).
//!
//! See the [HTTP API][crate::api] for the endpoints.
#![warn(clippy::pedantic)]

pub mod api;
pub mod auth;
pub mod config;
pub mod counter;
pub mod error;

pub use api::new as new_http;
pub use auth::{Claims, ClaimsLookup, TokenVerifier};
pub use config::{Config, SharedConfig};
pub use counter::{DynCounter, InMemoryCounter, MessageCounter};
