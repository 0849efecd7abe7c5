//! REST binding: routes, DTOs, and handlers.
//!
//! Grounded on the teacher's `api::rest` module (`server.rs`, `types.rs`,
//! `handlers/health_handlers.rs`), scaled down to the handful of routes
//! this service actually exposes.

pub mod handlers;
pub mod server;
pub mod types;

pub use server::RestApiServer;
