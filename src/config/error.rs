//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to install tracing subscriber: {0}")]
    LoggingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid RPC URL format")]
    InvalidRpcUrl,

    #[error("RPC URL must use HTTPS in production")]
    RpcUrlMustBeHttps,

    #[error("Invalid contract address: {0}")]
    InvalidContractAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Gas limit must be greater than zero")]
    InvalidGasLimit,

    #[error("Chain id must be greater than zero")]
    InvalidChainId,

    #[error("Invalid role hash for {field}: expected 64 hex characters")]
    InvalidRoleHash { field: &'static str },

    #[error("Role hashes must be configured together")]
    IncompleteRoleHashes,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
