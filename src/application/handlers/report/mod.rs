//! Reporting handlers.

mod compare_segments;
mod get_overview;

pub use compare_segments::{CompareSegmentsHandler, SegmentMetric, SegmentsReport};
pub use get_overview::{GetOverviewHandler, OverviewReport};
