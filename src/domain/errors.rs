use thiserror::Error;

/// Errors raised by domain validation
///
/// Malformed values are rejected at construction rather than coerced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid semester: {0} (expected 'First' or 'Third')")]
    InvalidSemester(String),

    #[error("Invalid role: {0} (expected 'user' or 'admin')")]
    InvalidRole(String),

    #[error("Score for {criterion} is {value}, maximum is 5")]
    ScoreOutOfRange { criterion: &'static str, value: u8 },
}

pub type DomainResult<T> = Result<T, DomainError>;
