//! NPS Pulse - Net Promoter Score survey backend
//!
//! This crate collects NPS surveys through single-use access codes,
//! records answers as they are given, and aggregates results into
//! promoter/neutral/detractor reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
