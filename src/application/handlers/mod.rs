//! Command and query handlers.
//!
//! Handlers orchestrate domain objects through the ports. They hold
//! `Arc<dyn Port>` references so adapters can be swapped freely (the
//! tests run them against the in-memory store).

pub mod answer;
pub mod code;
pub mod flow;
pub mod report;
