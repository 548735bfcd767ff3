//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `TicketContractReader` - Read-only calls on the ticket contract
//! - `TransactionSender` - Submission of contract transactions
//! - `WalletConnector` - Supplies the user's wallet address

mod ticket_contract;
mod wallet_connector;

pub use ticket_contract::{TicketContractReader, TransactionSender};
pub use wallet_connector::{ConnectedWallet, WalletConnector, WalletError};
