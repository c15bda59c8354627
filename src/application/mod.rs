//! Application layer - use cases built from domain plus ports.

pub mod handlers;
