// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes the failure cases the stores and flows can surface.
#[derive(Debug)]
pub enum AppError {
    // A quiz/subject/topic id did not resolve. Presented to the user as a
    // navigable message; never fatal to the process.
    NotFound(String),

    // Authoring input rejected (empty question list, bad numeric field, ...).
    // Submission is blocked; nothing is partially saved.
    Validation(String),

    // Submitting an attempt against an unknown quiz id. A programming
    // contract violation, not a recoverable user-facing case.
    GradingPrecondition(String),

    // Login stub rejected the identifier/credential pair.
    AuthError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
/// Allows using the `?` operator after `payload.validate()`.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
