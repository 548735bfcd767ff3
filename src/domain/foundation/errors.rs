//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: u128,
        max: u128,
        actual: u128,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: u128, max: u128, actual: u128) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidAddress,
    InvalidAmount,
    InvalidQuantity,
    WeakPassword,

    // Access errors
    RoleLookupFailed,
    AuthorizationDenied,

    // Wallet errors
    WalletUnavailable,
    WalletRejected,
    SigningUnavailable,

    // Action errors
    ActionPending,
    InsufficientFunds,
    ContractReverted,

    // Infrastructure errors
    NetworkError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidAddress => "INVALID_ADDRESS",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::WeakPassword => "WEAK_PASSWORD",
            ErrorCode::RoleLookupFailed => "ROLE_LOOKUP_FAILED",
            ErrorCode::AuthorizationDenied => "AUTHORIZATION_DENIED",
            ErrorCode::WalletUnavailable => "WALLET_UNAVAILABLE",
            ErrorCode::WalletRejected => "WALLET_REJECTED",
            ErrorCode::SigningUnavailable => "SIGNING_UNAVAILABLE",
            ErrorCode::ActionPending => "ACTION_PENDING",
            ErrorCode::InsufficientFunds => "INSUFFICIENT_FUNDS",
            ErrorCode::ContractReverted => "CONTRACT_REVERTED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
