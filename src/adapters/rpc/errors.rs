//! Mapping of ethers errors into [`ContractError`].

use ethers::contract::ContractError as CallError;
use ethers::providers::{Middleware, MiddlewareError};

use crate::domain::contract::ContractError;

/// Maps a provider or middleware failure.
///
/// JSON-RPC error objects keep their code (and revert reason); anything
/// without one is a transport failure.
pub fn from_middleware<E: MiddlewareError>(error: &E) -> ContractError {
    match error.as_error_response() {
        Some(response) => ContractError::from_rpc(response.code, response.message.clone()),
        None => ContractError::network(error.to_string()),
    }
}

/// Maps a failed contract call made through the generated bindings.
pub fn from_call<M: Middleware>(error: CallError<M>) -> ContractError {
    if let Some(reason) = error.decode_revert::<String>() {
        return ContractError::Reverted(reason);
    }
    match error {
        CallError::Revert(_) => ContractError::Reverted(String::new()),
        CallError::MiddlewareError { e } => from_middleware(&e),
        CallError::ProviderError { e } => from_middleware(&e),
        other => ContractError::decode(other.to_string()),
    }
}
