//! JSON-RPC adapters built on ethers.
//!
//! - `RpcConfig` / `RpcProvider` - HTTP provider with a request timeout
//! - `RpcTicketContract` - `TicketContractReader` + `TransactionSender`

mod errors;
mod provider;
mod ticket_contract;

pub use errors::{from_call, from_middleware};
pub use provider::{RpcConfig, RpcProvider};
pub use ticket_contract::RpcTicketContract;
