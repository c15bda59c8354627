//! Adapters - implementations of the port interfaces.
//!
//! - `postgres` - sqlx-backed persistence
//! - `http` - axum handlers and routers
//! - `events` - event publishing (tracing in production, capture bus in tests)
//! - `memory` - in-memory store for tests

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
