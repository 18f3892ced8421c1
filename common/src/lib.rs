//! Common types and utilities for the banking API
//!
//! This library contains the shared domain model, decimal helpers and the
//! unified error type used by the account service and the API gateway.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt, IntoError};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
