//! SurveyCode aggregate entity.
//!
//! A survey code is a single-use token granting access to one survey
//! instance, labeled with respondent and engagement metadata for later
//! segment reporting.
//!
//! # Invariants
//!
//! - `token` is globally unique at creation time (enforced by storage)
//! - `started_at` is set at most once, only null -> timestamp
//! - `completed_at` is set at most once, only after `started_at`
//! - a completed code is terminal and accepts no further activation

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, ProjectId, SurveyCodeId, Timestamp, ValidationError,
};

use super::{CodeLifecycle, CodeToken, Language, Scope, ServiceType};

/// Maximum length for the respondent name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Survey code aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyCode {
    /// Row identity (the token is the business identity).
    id: SurveyCodeId,

    /// Unique access token.
    token: CodeToken,

    /// Respondent name, used to greet them on the welcome step.
    name: String,

    /// Respondent email.
    email: String,

    /// Project the engagement belongs to (reference data).
    project_id: ProjectId,

    /// Engagement service type (segment dimension).
    service_type: ServiceType,

    /// Survey display language.
    language: Language,

    /// Engagement scopes shown on the welcome step.
    scopes: Vec<Scope>,

    /// When the code was generated.
    generated_at: Timestamp,

    /// When the respondent first entered the survey, if ever.
    started_at: Option<Timestamp>,

    /// When the survey was submitted, if ever. Terminal once set.
    completed_at: Option<Timestamp>,
}

impl SurveyCode {
    /// Creates a freshly generated code.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for blank name or email
    /// - `InvalidFormat` for an implausible email or oversized name
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SurveyCodeId,
        token: CodeToken,
        name: String,
        email: String,
        project_id: ProjectId,
        service_type: ServiceType,
        language: Language,
        scopes: Vec<Scope>,
    ) -> Result<Self, ValidationError> {
        Self::validate_name(&name)?;
        Self::validate_email(&email)?;

        Ok(Self {
            id,
            token,
            name,
            email,
            project_id,
            service_type,
            language,
            scopes,
            generated_at: Timestamp::now(),
            started_at: None,
            completed_at: None,
        })
    }

    /// Reconstitutes a code from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SurveyCodeId,
        token: CodeToken,
        name: String,
        email: String,
        project_id: ProjectId,
        service_type: ServiceType,
        language: Language,
        scopes: Vec<Scope>,
        generated_at: Timestamp,
        started_at: Option<Timestamp>,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            token,
            name,
            email,
            project_id,
            service_type,
            language,
            scopes,
            generated_at,
            started_at,
            completed_at,
        }
    }

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "name",
                format!("must be at most {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<(), ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "missing @ symbol",
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SurveyCodeId {
        &self.id
    }

    pub fn token(&self) -> &CodeToken {
        &self.token
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn generated_at(&self) -> &Timestamp {
        &self.generated_at
    }

    pub fn started_at(&self) -> Option<&Timestamp> {
        self.started_at.as_ref()
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Lifecycle as seen by a caller entering the flow.
    pub fn lifecycle(&self) -> CodeLifecycle {
        if self.completed_at.is_some() {
            CodeLifecycle::Completed
        } else {
            CodeLifecycle::Fresh
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    // ─────────────────────────────────────────────────────────────────
    // Lifecycle transitions
    // ─────────────────────────────────────────────────────────────────

    /// Marks the code as started, idempotently.
    ///
    /// Returns the effective `started_at`: the supplied `now` on the
    /// first call, the original timestamp on any later call. The
    /// storage adapters mirror this contract with a conditional update,
    /// this in-memory form exists for the aggregate and test adapters.
    ///
    /// # Errors
    ///
    /// - `CodeAlreadyCompleted` if the code is terminal
    pub fn start(&mut self, now: Timestamp) -> Result<Timestamp, DomainError> {
        if self.completed_at.is_some() {
            return Err(DomainError::new(
                ErrorCode::CodeAlreadyCompleted,
                format!("Code {} is already completed", self.token),
            ));
        }
        Ok(*self.started_at.get_or_insert(now))
    }

    /// Marks the code as completed, idempotently.
    ///
    /// Returns the effective `completed_at`; calling on an already
    /// completed code changes nothing and is not an error.
    ///
    /// # Errors
    ///
    /// - `CodeNotStarted` if the code was never activated
    pub fn complete(&mut self, now: Timestamp) -> Result<Timestamp, DomainError> {
        if self.started_at.is_none() {
            return Err(DomainError::new(
                ErrorCode::CodeNotStarted,
                format!("Code {} was never activated", self.token),
            ));
        }
        Ok(*self.completed_at.get_or_insert(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_code() -> SurveyCode {
        SurveyCode::new(
            SurveyCodeId::new(),
            CodeToken::parse("ABC23456").unwrap(),
            "Joana Silva".to_string(),
            "joana@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Experience,
            Language::default(),
            vec![Scope::Strategy, Scope::Design],
        )
        .unwrap()
    }

    #[test]
    fn new_code_is_fresh_and_unstarted() {
        let code = sample_code();
        assert_eq!(code.lifecycle(), CodeLifecycle::Fresh);
        assert!(!code.is_started());
        assert!(!code.is_completed());
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = SurveyCode::new(
            SurveyCodeId::new(),
            CodeToken::parse("ABC23456").unwrap(),
            "  ".to_string(),
            "joana@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Strategy,
            Language::default(),
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_email_without_at() {
        let result = SurveyCode::new(
            SurveyCodeId::new(),
            CodeToken::parse("ABC23456").unwrap(),
            "Joana".to_string(),
            "joana.example.com".to_string(),
            ProjectId::new(),
            ServiceType::Strategy,
            Language::default(),
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn start_sets_timestamp_once() {
        let mut code = sample_code();
        let first = Timestamp::now();
        let effective = code.start(first).unwrap();
        assert_eq!(effective, first);

        // second activation keeps the original timestamp
        let second = Timestamp::now();
        let effective = code.start(second).unwrap();
        assert_eq!(effective, first);
        assert_eq!(code.started_at(), Some(&first));
    }

    #[test]
    fn complete_requires_activation() {
        let mut code = sample_code();
        assert!(code.complete(Timestamp::now()).is_err());
    }

    #[test]
    fn complete_is_idempotent() {
        let mut code = sample_code();
        code.start(Timestamp::now()).unwrap();

        let first = Timestamp::now();
        assert_eq!(code.complete(first).unwrap(), first);
        assert_eq!(code.complete(Timestamp::now()).unwrap(), first);
        assert_eq!(code.completed_at(), Some(&first));
    }

    #[test]
    fn completed_code_rejects_activation() {
        let mut code = sample_code();
        code.start(Timestamp::now()).unwrap();
        code.complete(Timestamp::now()).unwrap();

        let err = code.start(Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CodeAlreadyCompleted);
        assert_eq!(code.lifecycle(), CodeLifecycle::Completed);
    }
}
