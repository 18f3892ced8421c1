//! Error types for the banking API
//!
//! This module provides a unified error handling system shared by the
//! account service and the API gateway. Every variant except `Internal` and
//! `Serialization` describes a problem with client input.

use std::fmt::Display;
use thiserror::Error;

/// Banking API error type
#[derive(Debug, Error)]
pub enum Error {
    /// No customer matches the supplied identifier
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// A customer with the supplied identifier already exists
    #[error("Customer already exists: {0}")]
    AlreadyExists(String),

    /// Amount is zero or negative
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Malformed or missing input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by client input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Internal(_) | Error::Serialization(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::NotFound(msg) => Error::NotFound(format!("{}: {}", context, msg)),
                Error::AlreadyExists(msg) => Error::AlreadyExists(format!("{}: {}", context, msg)),
                Error::InvalidArgument(msg) => Error::InvalidArgument(format!("{}: {}", context, msg)),
                Error::InsufficientFunds(msg) => Error::InsufficientFunds(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Serialization(e) => Error::Serialization(e),
            }
        })
    }
}

/// Trait for converting other error types to our Error type
pub trait IntoError {
    /// Convert to Error
    fn into_error(self, message: &str) -> Error;
}

impl<E: std::error::Error> IntoError for E {
    fn into_error(self, message: &str) -> Error {
        Error::Internal(format!("{}: {}", message, self))
    }
}
