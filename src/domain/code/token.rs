//! Survey access code tokens.
//!
//! A token is the URL-safe string a respondent types (or receives in a
//! link) to open their survey. Canonical format is 8 uppercase
//! alphanumeric characters drawn from an alphabet without the ambiguous
//! glyphs `0 O 1 I`; older 6-digit numeric codes still parse.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Generation alphabet: uppercase alphanumerics minus `0 O 1 I`.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Canonical length for newly generated tokens.
pub const DEFAULT_CODE_LENGTH: usize = 8;

const MIN_TOKEN_LENGTH: usize = 4;
const MAX_TOKEN_LENGTH: usize = 16;

/// A survey access code token.
///
/// Always stored uppercase; parsing normalizes case so codes survive
/// being retyped from an email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeToken(String);

impl CodeToken {
    /// Parses and normalizes a token supplied by a caller.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the trimmed input is empty
    /// - `InvalidFormat` if length or characters are out of bounds
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        if trimmed.len() < MIN_TOKEN_LENGTH || trimmed.len() > MAX_TOKEN_LENGTH {
            return Err(ValidationError::invalid_format(
                "code",
                format!(
                    "length must be {}-{} characters",
                    MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH
                ),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::invalid_format(
                "code",
                "only ASCII letters and digits are allowed",
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CodeToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Random token generator.
///
/// Produces candidates only; uniqueness is the caller's concern.
/// A collision against existing codes is answered by regenerating and
/// rechecking, never by an error on the first try.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
    alphabet: &'static [u8],
}

impl CodeGenerator {
    /// Creates a generator for tokens of the given length over the
    /// canonical alphabet.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            alphabet: CODE_ALPHABET,
        }
    }

    /// Overrides the alphabet (exposed for tests exercising collisions).
    pub fn with_alphabet(mut self, alphabet: &'static [u8]) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Generates one candidate token.
    pub fn generate(&self) -> CodeToken {
        let mut rng = rand::thread_rng();
        let token: String = (0..self.length)
            .map(|_| {
                let idx = rng.gen_range(0..self.alphabet.len());
                self.alphabet[idx] as char
            })
            .collect();
        CodeToken(token)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}
