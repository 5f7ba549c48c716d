use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;

/// User-supplied input that violates a precondition of the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("Please specify either age or date of birth, not both.")]
    BothSupplied,

    #[error("Please specify either age or date of birth.")]
    NeitherSupplied,

    #[error("Date of birth cannot be in the future.")]
    FutureDate { dob: NaiveDate, today: NaiveDate },

    #[error("Date of birth cannot be before {earliest}.")]
    BeforeEarliest { dob: NaiveDate, earliest: NaiveDate },

    #[error("Age must be between 1 and 129.")]
    AgeOutOfRange { age: i64 },
}

/// Failure of the optional summary service. Never escapes the summary
/// generator; it is rendered into the returned text instead.
#[derive(Error, Debug)]
pub enum ExternalServiceError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("empty response from model")]
    EmptyResponse,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}
