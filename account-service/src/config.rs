//! Configuration for the account service

use std::env;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Log every appended operation at info level instead of debug
    pub transaction_logging: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            transaction_logging: env::var("TRANSACTION_LOGGING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl AccountServiceConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create a new configuration with custom values
    pub fn new(transaction_logging: bool) -> Self {
        Self {
            transaction_logging,
        }
    }
}
