//! Shared primitives for all Rust crates in Tahfeez.

#![forbid(unsafe_code)]

/// Authentication primitives shared across layers.
pub mod auth;
/// Interface language negotiation.
pub mod locale;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AdminIdentity, AdminSession};
pub use locale::Locale;

/// Result type used across Tahfeez crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input, either caught locally or rejected by the server with 422.
    ///
    /// The message is user-facing and shown verbatim.
    #[error("{0}")]
    Validation(String),

    /// Caller is not authenticated or the session expired.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but not allowed to perform the action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("http error {status}: {message}")]
    Http {
        /// Response status code.
        status: u16,
        /// Server-supplied message, or a generic status description.
        message: String,
    },

    /// Request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Local session persistence failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether the error means the stored session is no longer valid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
