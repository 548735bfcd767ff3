//! Ticket contract ports.
//!
//! The contract is the single source of truth for who the venue and doorman
//! are. Reads and writes are split so that read-only contexts (role lookup,
//! balance views) never hold a transaction sender.
//!
//! # Example
//!
//! ```ignore
//! async fn show_price(contract: &dyn TicketContractReader) -> Result<String, ContractError> {
//!     let price = contract.ticket_price().await?;
//!     Ok(price.to_ether_string())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::contract::{ContractError, TransactionRequest, TxHash};
use crate::domain::foundation::{WalletAddress, Wei};

/// Read-only view of the deployed ticket contract.
///
/// Ticket token amounts use the same 18 decimals as ether and are returned
/// as [`Wei`].
///
/// # Contract
///
/// Implementations must:
/// - Return `ContractError::Network` for transport failures
/// - Return `ContractError::Decode` for malformed return data
/// - Never substitute a default value for a failed read
#[async_trait]
pub trait TicketContractReader: Send + Sync {
    /// Address of the deployed contract.
    fn address(&self) -> WalletAddress;

    /// The venue wallet configured on the contract.
    async fn venue(&self) -> Result<WalletAddress, ContractError>;

    /// The doorman wallet configured on the contract.
    async fn doorman(&self) -> Result<WalletAddress, ContractError>;

    /// Ticket token balance of an account.
    async fn balance_of(&self, account: &WalletAddress) -> Result<Wei, ContractError>;

    /// Current price of one ticket.
    async fn ticket_price(&self) -> Result<Wei, ContractError>;

    async fn total_tokens_sold(&self) -> Result<Wei, ContractError>;

    async fn total_supply(&self) -> Result<Wei, ContractError>;

    /// Native ether balance of any account, including the contract itself.
    async fn ether_balance(&self, account: &WalletAddress) -> Result<Wei, ContractError>;
}

/// Submits transactions for signing and broadcast.
///
/// Requests carrying a [`LocalSigner`](crate::domain::contract::LocalSigner)
/// must be signed with it and sent raw; the rest are signed by the node.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ContractError>;
}
