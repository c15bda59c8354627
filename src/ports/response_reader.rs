//! Response reader port (read side for reporting).

use async_trait::async_trait;

use crate::domain::code::CodeToken;
use crate::domain::foundation::DomainError;
use crate::domain::reporting::CodeResponse;

/// Reader port assembling code metadata with its recorded answers.
///
/// Feeds the aggregator a snapshot; implementations may denormalize or
/// cache, the aggregator never writes through this port.
#[async_trait]
pub trait ResponseReader: Send + Sync {
    /// Every code with its answer log, across the whole population.
    async fn fetch_all_responses(&self) -> Result<Vec<CodeResponse>, DomainError>;

    /// One code's response, if the code exists.
    async fn fetch_response(
        &self,
        token: &CodeToken,
    ) -> Result<Option<CodeResponse>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ResponseReader) {}
    }
}
