//! API handlers
//!
//! Each handler follows the same pipeline:
//! - Resolve the customer from the `cpf` header when the route needs one
//! - Extract and validate the body or query
//! - Call the account service
//! - Wrap the result in the standard response envelope

pub mod account;
pub mod response;
pub mod statement;
pub mod system;
pub mod transaction;

pub use response::{ApiListResponse, ApiResponse};
