//! Survey code repository port (write side).

use async_trait::async_trait;

use crate::domain::code::{CodeToken, SurveyCode};
use crate::domain::foundation::{DomainError, Timestamp};

/// Repository port for survey code persistence and lifecycle writes.
///
/// The lifecycle methods own the concurrency contract: both are
/// one-way, conditional, idempotent updates arbitrated by the store,
/// never read-then-write from the caller.
#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Persist a newly generated code.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure, including a uniqueness
    ///   violation on the token (callers regenerate and retry)
    async fn save(&self, code: &SurveyCode) -> Result<(), DomainError>;

    /// Look up a code by its token.
    ///
    /// Returns `None` when absent.
    async fn find_by_token(&self, token: &CodeToken) -> Result<Option<SurveyCode>, DomainError>;

    /// Check whether a token is already taken (generation uniqueness
    /// probe).
    async fn token_exists(&self, token: &CodeToken) -> Result<bool, DomainError>;

    /// Set `started_at = now()` iff it is currently null, atomically.
    ///
    /// Concurrent activations of the same code must converge on a
    /// single timestamp: the update is conditioned on `started_at IS
    /// NULL` at the storage layer (compare-and-set), so the returned
    /// value is the one effective `started_at` whichever caller won.
    ///
    /// # Errors
    ///
    /// - `CodeNotFound` if the token is unknown
    /// - `CodeAlreadyCompleted` if the code is terminal
    async fn activate(&self, token: &CodeToken) -> Result<Timestamp, DomainError>;

    /// Set `completed_at = now()` iff it is currently null.
    ///
    /// Idempotent: completing an already-completed code changes nothing
    /// and returns the original timestamp.
    ///
    /// # Errors
    ///
    /// - `CodeNotFound` if the token is unknown
    /// - `CodeNotStarted` if the code was never activated
    async fn complete(&self, token: &CodeToken) -> Result<Timestamp, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CodeRepository) {}
    }
}
