//! In-memory ticket contract for tests.
//!
//! Implements both contract ports over a small mutable state so tests can
//! drive role resolution and ticket actions without a node.
//!
//! # Example
//!
//! ```ignore
//! let contract = MockTicketContract::new(venue, doorman)
//!     .with_ticket_price(Wei::parse_ether("0.01")?)
//!     .with_ether_balance(customer, Wei::from_whole_ether(1));
//!
//! let role = RoleResolver::new(Arc::new(contract)).resolve(&venue).await?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::contract::{ContractError, TransactionRequest, TxHash};
use crate::domain::foundation::{WalletAddress, Wei};
use crate::ports::{TicketContractReader, TransactionSender};

#[derive(Debug)]
struct ChainState {
    venue: WalletAddress,
    doorman: WalletAddress,
    ticket_balances: HashMap<WalletAddress, Wei>,
    ether_balances: HashMap<WalletAddress, Wei>,
    ticket_price: Wei,
    total_tokens_sold: Wei,
    total_supply: Wei,
}

/// Mock ticket contract.
///
/// Reads fail with the forced error when one is set. Sends fail with the
/// forced error or the configured revert reason and are otherwise recorded.
pub struct MockTicketContract {
    address: WalletAddress,
    state: RwLock<ChainState>,
    force_error: RwLock<Option<ContractError>>,
    revert: RwLock<Option<String>>,
    read_delay: Option<Duration>,
    send_delay: Option<Duration>,
    venue_reads: AtomicUsize,
    reads: AtomicUsize,
    sent: Mutex<Vec<TransactionRequest>>,
    next_hash: AtomicU64,
}

impl MockTicketContract {
    /// Contract deployed at a fixed test address with the given venue and
    /// doorman.
    pub fn new(venue: WalletAddress, doorman: WalletAddress) -> Self {
        Self {
            address: WalletAddress::from_bytes([0xc0; 20]),
            state: RwLock::new(ChainState {
                venue,
                doorman,
                ticket_balances: HashMap::new(),
                ether_balances: HashMap::new(),
                ticket_price: Wei::ZERO,
                total_tokens_sold: Wei::ZERO,
                total_supply: Wei::ZERO,
            }),
            force_error: RwLock::new(None),
            revert: RwLock::new(None),
            read_delay: None,
            send_delay: None,
            venue_reads: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            next_hash: AtomicU64::new(1),
        }
    }

    pub fn with_address(mut self, address: WalletAddress) -> Self {
        self.address = address;
        self
    }

    /// Sets an account's ticket token balance.
    pub fn with_balance(self, account: WalletAddress, tickets: Wei) -> Self {
        self.state.write().unwrap().ticket_balances.insert(account, tickets);
        self
    }

    /// Sets an account's native ether balance. Use the contract's own
    /// address for the contract balance.
    pub fn with_ether_balance(self, account: WalletAddress, amount: Wei) -> Self {
        self.state.write().unwrap().ether_balances.insert(account, amount);
        self
    }

    pub fn with_ticket_price(self, price: Wei) -> Self {
        self.state.write().unwrap().ticket_price = price;
        self
    }

    pub fn with_supply(self, total_supply: Wei, total_tokens_sold: Wei) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.total_supply = total_supply;
            state.total_tokens_sold = total_tokens_sold;
        }
        self
    }

    /// Forces every read and send to fail with `error`.
    pub fn with_error(self, error: ContractError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Makes every send revert with `reason`.
    pub fn with_revert(self, reason: impl Into<String>) -> Self {
        *self.revert.write().unwrap() = Some(reason.into());
        self
    }

    /// Delays every read, so concurrent callers overlap.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Delays every send, so a second submission arrives while pending.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    pub fn set_error(&self, error: ContractError) {
        *self.force_error.write().unwrap() = Some(error);
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Reassigns the venue, as `setVenue` would on chain.
    pub fn set_venue(&self, venue: WalletAddress) {
        self.state.write().unwrap().venue = venue;
    }

    /// Number of role lookups served (counted by `venue()` reads).
    pub fn role_lookups(&self) -> usize {
        self.venue_reads.load(Ordering::SeqCst)
    }

    /// Number of reads of any kind.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Transactions accepted so far, in order.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    async fn begin_read(&self) -> Result<(), ContractError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn next_tx_hash(&self) -> TxHash {
        let n = self.next_hash.fetch_add(1, Ordering::SeqCst);
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        TxHash::from_bytes(bytes)
    }
}

#[async_trait]
impl TicketContractReader for MockTicketContract {
    fn address(&self) -> WalletAddress {
        self.address
    }

    async fn venue(&self) -> Result<WalletAddress, ContractError> {
        self.venue_reads.fetch_add(1, Ordering::SeqCst);
        self.begin_read().await?;
        Ok(self.state.read().unwrap().venue)
    }

    async fn doorman(&self) -> Result<WalletAddress, ContractError> {
        self.begin_read().await?;
        Ok(self.state.read().unwrap().doorman)
    }

    async fn balance_of(&self, account: &WalletAddress) -> Result<Wei, ContractError> {
        self.begin_read().await?;
        let state = self.state.read().unwrap();
        Ok(state.ticket_balances.get(account).copied().unwrap_or(Wei::ZERO))
    }

    async fn ticket_price(&self) -> Result<Wei, ContractError> {
        self.begin_read().await?;
        Ok(self.state.read().unwrap().ticket_price)
    }

    async fn total_tokens_sold(&self) -> Result<Wei, ContractError> {
        self.begin_read().await?;
        Ok(self.state.read().unwrap().total_tokens_sold)
    }

    async fn total_supply(&self) -> Result<Wei, ContractError> {
        self.begin_read().await?;
        Ok(self.state.read().unwrap().total_supply)
    }

    async fn ether_balance(&self, account: &WalletAddress) -> Result<Wei, ContractError> {
        self.begin_read().await?;
        let state = self.state.read().unwrap();
        Ok(state.ether_balances.get(account).copied().unwrap_or(Wei::ZERO))
    }
}

#[async_trait]
impl TransactionSender for MockTicketContract {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ContractError> {
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        if let Some(reason) = self.revert.read().unwrap().clone() {
            return Err(ContractError::Reverted(reason));
        }

        self.sent.lock().unwrap().push(tx.clone());
        Ok(self.next_tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::ContractCall;

    fn addr(byte: u8) -> WalletAddress {
        WalletAddress::from_bytes([byte; 20])
    }

    #[tokio::test]
    async fn serves_configured_state() {
        let contract = MockTicketContract::new(addr(1), addr(2))
            .with_balance(addr(3), Wei::from_whole_ether(2))
            .with_ticket_price(Wei::from_wei(10));

        assert_eq!(contract.venue().await.unwrap(), addr(1));
        assert_eq!(contract.doorman().await.unwrap(), addr(2));
        assert_eq!(contract.balance_of(&addr(3)).await.unwrap(), Wei::from_whole_ether(2));
        assert_eq!(contract.balance_of(&addr(4)).await.unwrap(), Wei::ZERO);
        assert_eq!(contract.ticket_price().await.unwrap(), Wei::from_wei(10));
        assert_eq!(contract.role_lookups(), 1);
        assert_eq!(contract.reads(), 5);
    }

    #[tokio::test]
    async fn forced_error_fails_reads_until_cleared() {
        let contract = MockTicketContract::new(addr(1), addr(2))
            .with_error(ContractError::network("connection reset"));

        assert!(contract.venue().await.is_err());
        contract.clear_error();
        assert!(contract.venue().await.is_ok());
    }

    #[tokio::test]
    async fn records_sent_transactions_with_distinct_hashes() {
        let contract = MockTicketContract::new(addr(1), addr(2));
        let tx = TransactionRequest::for_call(addr(3), contract.address(), ContractCall::DepositFunds);

        let first = contract.send_transaction(&tx).await.unwrap();
        let second = contract.send_transaction(&tx).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(contract.sent_transactions().len(), 2);
    }

    #[tokio::test]
    async fn revert_reason_is_returned() {
        let contract = MockTicketContract::new(addr(1), addr(2)).with_revert("nope");
        let tx = TransactionRequest::for_call(addr(3), contract.address(), ContractCall::DepositFunds);

        assert_eq!(
            contract.send_transaction(&tx).await,
            Err(ContractError::Reverted("nope".to_string()))
        );
        assert!(contract.sent_transactions().is_empty());
    }
}
