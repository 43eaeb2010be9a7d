//! Membox API
//!
//! The HTTP surface of the service: session-auth middleware backed by the
//! external identity provider, the upload and caption gateway handlers, and
//! the router/server wiring. Exposed as a library so the integration tests
//! can assemble the router around in-process fakes.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
