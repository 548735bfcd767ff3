//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the ticket gate domain.

mod address;
mod amount;
mod errors;
mod ids;

pub use address::WalletAddress;
pub use amount::{Wei, DECIMALS};
pub use errors::{ErrorCode, ValidationError};
pub use ids::SessionId;
