//! Unified error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Rejections from the triangular sum functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SumError {
    #[error("Input must be a non-negative integer, got a non-numeric value: {0}")]
    NotANumber(String),

    #[error("Input must be a non-negative integer, got a fraction: {0}")]
    NotAnInteger(String),

    #[error("Input must be a non-negative integer, got a negative value: {0}")]
    Negative(String),

    #[error("Sum to {0} overflows u64")]
    Overflow(u64),

    #[error("Recursion limit of {limit} exceeded for n = {n}")]
    RecursionLimit { n: u64, limit: u64 },
}

/// Swap form submission errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields (missing: {})", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("Prices are still loading")]
    Busy,
}
