//! Reporting module - NPS aggregation over collected responses.
//!
//! All computation here is pure and synchronous over an
//! already-fetched snapshot; it holds no shared mutable state and is
//! safely re-entrant.

mod classify;
mod segment;

pub use classify::{classify, nps_score, CategoryCounts, ScoreCategory};
pub use segment::{segment, CodeResponse, SegmentReport};
