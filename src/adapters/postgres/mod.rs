//! PostgreSQL adapters for the persistence ports.

mod answer_repository;
mod code_repository;
mod project_reader;
mod response_reader;

pub use answer_repository::PostgresAnswerRepository;
pub use code_repository::PostgresCodeRepository;
pub use project_reader::PostgresProjectReader;
pub use response_reader::PostgresResponseReader;
