//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CodeRepository` - survey code persistence and lifecycle writes
//! - `AnswerRepository` - the append-only answer log
//! - `ResponseReader` - read side feeding the aggregator
//! - `ProjectReader` - project/company reference data
//! - `EventPublisher` - best-effort domain event publishing

mod answer_repository;
mod code_repository;
mod event_publisher;
mod project_reader;
mod response_reader;

pub use answer_repository::AnswerRepository;
pub use code_repository::CodeRepository;
pub use event_publisher::EventPublisher;
pub use project_reader::{ProjectLabel, ProjectReader};
pub use response_reader::ResponseReader;
