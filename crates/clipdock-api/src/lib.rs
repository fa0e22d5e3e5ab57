//! Clipdock API library
//!
//! The HTTP surface of the video-hosting backend: authentication, upload and
//! metadata handlers, routing, and error-to-response mapping. The binary in
//! `main.rs` wires this against Postgres and the configured object store;
//! integration tests wire it against in-memory adapters.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
