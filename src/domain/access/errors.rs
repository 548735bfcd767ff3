//! Access errors: bad input, failed lookups and denials.

use thiserror::Error;

use super::Redirect;
use crate::domain::contract::ContractError;
use crate::domain::foundation::{ErrorCode, ValidationError, WalletAddress};

/// Errors produced by role resolution and the guard.
///
/// A failed lookup is never folded into a Customer result; callers must
/// handle it separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(#[source] ValidationError),

    #[error("Could not determine the role of {address}: {source}")]
    RoleLookup {
        address: WalletAddress,
        #[source]
        source: ContractError,
    },

    #[error("Authorization denied")]
    AuthorizationDenied { redirect: Redirect },
}

impl AccessError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AccessError::InvalidAddress(_) => ErrorCode::InvalidAddress,
            AccessError::RoleLookup { .. } => ErrorCode::RoleLookupFailed,
            AccessError::AuthorizationDenied { .. } => ErrorCode::AuthorizationDenied,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AccessError::InvalidAddress(_) => {
                "Please enter a valid wallet address.".to_string()
            }
            AccessError::RoleLookup { .. } => {
                "Couldn't verify your access. Please try again.".to_string()
            }
            AccessError::AuthorizationDenied { redirect } => redirect.message.to_string(),
        }
    }

    /// Only lookup failures are worth a user-initiated retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AccessError::RoleLookup { .. })
    }

    /// Redirect target for denials.
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            AccessError::AuthorizationDenied { redirect } => Some(redirect),
            _ => None,
        }
    }
}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        AccessError::InvalidAddress(err)
    }
}
