//! Errors raised while talking to the ticket contract.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Failure of a contract read or transaction submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Execution reverted: {0}")]
    Reverted(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ContractError {
    pub fn network(message: impl Into<String>) -> Self {
        ContractError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ContractError::Decode(message.into())
    }

    /// Builds an error from a JSON-RPC error object.
    ///
    /// Nodes report reverts as `execution reverted[: reason]`; those become
    /// [`ContractError::Reverted`] carrying the bare reason.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        match message.strip_prefix("execution reverted") {
            Some(rest) => {
                let reason = rest.trim_start_matches(':').trim();
                ContractError::Reverted(reason.to_string())
            }
            None => ContractError::Rpc { code, message },
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContractError::Network(_) => ErrorCode::NetworkError,
            ContractError::Reverted(_) => ErrorCode::ContractReverted,
            ContractError::Rpc { .. } | ContractError::Decode(_) => ErrorCode::InternalError,
        }
    }
}
