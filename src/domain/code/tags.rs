//! Classification tags carried by a survey code.
//!
//! Scopes and service types label the engagement the survey is about and
//! drive segment reporting. They have no behavior beyond identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Engagement scope tag on a survey code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Strategy,
    Design,
    Solutions,
    Tech,
    #[serde(rename = "m&a")]
    MergersAndFinance,
}

impl Scope {
    /// Canonical storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Strategy => "strategy",
            Scope::Design => "design",
            Scope::Solutions => "solutions",
            Scope::Tech => "tech",
            Scope::MergersAndFinance => "m&a",
        }
    }

    /// All known scopes, in display order.
    pub fn all() -> [Scope; 5] {
        [
            Scope::Strategy,
            Scope::Design,
            Scope::Solutions,
            Scope::Tech,
            Scope::MergersAndFinance,
        ]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strategy" => Ok(Scope::Strategy),
            "design" => Ok(Scope::Design),
            "solutions" => Ok(Scope::Solutions),
            "tech" => Ok(Scope::Tech),
            "m&a" => Ok(Scope::MergersAndFinance),
            other => Err(ValidationError::invalid_format(
                "scope",
                format!("unknown scope '{}'", other),
            )),
        }
    }
}

/// Service type of the engagement a survey code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Experience,
    Strategy,
}

impl ServiceType {
    /// Canonical storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Experience => "experience",
            ServiceType::Strategy => "strategy",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experience" => Ok(ServiceType::Experience),
            "strategy" => Ok(ServiceType::Strategy),
            other => Err(ValidationError::invalid_format(
                "service_type",
                format!("unknown service type '{}'", other),
            )),
        }
    }
}

/// Display language tag for the survey (not translated by the core).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Creates a language tag; empty input falls back to the default.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag.trim().is_empty() {
            Self::default()
        } else {
            Self(tag)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_round_trips_through_storage_form() {
        for scope in Scope::all() {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
        }
    }

    #[test]
    fn scope_rejects_unknown_tag() {
        assert!("finance".parse::<Scope>().is_err());
    }

    #[test]
    fn service_type_round_trips() {
        assert_eq!(
            "experience".parse::<ServiceType>().unwrap(),
            ServiceType::Experience
        );
        assert_eq!(
            "strategy".parse::<ServiceType>().unwrap(),
            ServiceType::Strategy
        );
    }

    #[test]
    fn language_defaults_to_english() {
        assert_eq!(Language::default().as_str(), "en");
        assert_eq!(Language::new("  ").as_str(), "en");
        assert_eq!(Language::new("pt-BR").as_str(), "pt-BR");
    }
}
