//! Survey code module - access code lifecycle.
//!
//! Covers generation, validation, and the one-way `generated ->
//! started -> completed` lifecycle of single-use survey access codes.

mod aggregate;
pub mod events;
mod lifecycle;
mod tags;
mod token;

pub use aggregate::{SurveyCode, MAX_NAME_LENGTH};
pub use lifecycle::CodeLifecycle;
pub use tags::{Language, Scope, ServiceType};
pub use token::{CodeGenerator, CodeToken, CODE_ALPHABET, DEFAULT_CODE_LENGTH};
