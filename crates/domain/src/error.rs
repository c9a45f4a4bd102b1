//! Domain error taxonomy.
//!
//! All engine errors are value returns; nothing in this crate panics on
//! bad input or throws across the audit-log boundary.

use thiserror::Error;

/// Errors produced by the registration rules engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing configuration. Callers fail closed: a broken
    /// date config resolves to the most restrictive phase, never to
    /// "allow" or "free".
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed crew or boat input. Reported to the caller, not retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// Race or eligibility mismatch, with a human-readable reason
    /// suitable for UI display.
    #[error("not eligible: {0}")]
    NotEligible(String),

    /// A permission check failed; carries the specific failing rule.
    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// A storage collaborator failed. Retries, if any, belong to the
    /// collaborator, not this engine.
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_eligible(msg: impl Into<String>) -> Self {
        Self::NotEligible(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
