//! Ticket contract vocabulary: ABI bindings, transactions and call errors.
//!
//! The contract itself is an external collaborator; this module only knows
//! its function signatures.

pub mod abi;
mod errors;
mod signer;
mod transaction;

pub use abi::ContractCall;
pub use errors::ContractError;
pub use signer::LocalSigner;
pub use transaction::{TransactionRequest, TxHash, DEFAULT_GAS_LIMIT};
