//! Unified error types for the domain layer
//!
//! Derived numeric fields (armor class, skill values, modifiers) have no error
//! path: once a character exists they are total functions of its state. The
//! variants below cover the few inputs that can genuinely be rejected.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A race, class, or other required record is missing from the rule set
    #[error("Incomplete data: unknown {kind} '{slug}'")]
    IncompleteData { kind: &'static str, slug: String },

    /// A short rest asked for a number of hit dice outside `1..=available`
    #[error("Invalid rest request: cannot spend {requested} hit dice ({available} available)")]
    InvalidRestRequest { requested: u32, available: u32 },

    /// A level-up choice referenced an option that is not on offer
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an incomplete-data error for a record that does not resolve.
    ///
    /// # Example
    /// ```ignore
    /// let race = rules
    ///     .race(&input.race)
    ///     .ok_or_else(|| DomainError::incomplete_data("race", &input.race))?;
    /// ```
    pub fn incomplete_data(kind: &'static str, slug: impl Into<String>) -> Self {
        Self::IncompleteData {
            kind,
            slug: slug.into(),
        }
    }

    /// Create an invalid rest request error
    pub fn invalid_rest_request(requested: u32, available: u32) -> Self {
        Self::InvalidRestRequest {
            requested,
            available,
        }
    }

    /// Create an invalid choice error
    pub fn invalid_choice(msg: impl Into<String>) -> Self {
        Self::InvalidChoice(msg.into())
    }

    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether the caller can surface this to the user and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRestRequest { .. } | Self::InvalidChoice(_) | Self::Validation(_)
        )
    }
}
