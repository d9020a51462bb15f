//! Restore error types.

use thiserror::Error;

/// Error raised while assembling a restore specification.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// A required argument was empty. Programming error, never recovered.
    #[error("required argument `{argument}` was empty")]
    ContractViolation { argument: &'static str },

    /// The project is missing state the strict build path requires.
    #[error("project `{project}` is missing required state: {what}")]
    MissingProjectState { project: String, what: &'static str },

    /// A version or version-range expression could not be parsed.
    #[error("invalid version `{input}`: {reason}")]
    InvalidVersion { input: String, reason: String },

    /// A target-framework short name could not be parsed.
    #[error("invalid target framework `{0}`")]
    InvalidFramework(String),

    /// Project state was read off the affinity thread.
    #[error("operation requires the project affinity thread")]
    AffinityViolation,

    /// The affinity thread went away before the operation completed.
    #[error("affinity thread terminated before the operation completed")]
    AffinityLost,
}

impl RestoreError {
    pub fn invalid_version(input: impl Into<String>, reason: impl ToString) -> Self {
        RestoreError::InvalidVersion {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
