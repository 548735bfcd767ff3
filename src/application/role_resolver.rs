//! Role resolution against the ticket contract.
//!
//! The contract's `venue()` and `doorman()` getters are the only authority.
//! Results are memoized per address for the lifetime of the resolver, which
//! is one session context. Failed lookups are not memoized.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use super::RoleHintCache;
use crate::domain::access::{AccessError, Role, RoleAssignment};
use crate::domain::foundation::WalletAddress;
use crate::ports::TicketContractReader;

pub struct RoleResolver {
    contract: Arc<dyn TicketContractReader>,
    resolved: Mutex<HashMap<WalletAddress, Arc<OnceCell<Role>>>>,
    hints: Option<RoleHintCache>,
}

impl RoleResolver {
    pub fn new(contract: Arc<dyn TicketContractReader>) -> Self {
        Self {
            contract,
            resolved: Mutex::new(HashMap::new()),
            hints: None,
        }
    }

    /// Attaches an advisory hint cache, reconciled on every lookup.
    pub fn with_hints(mut self, hints: RoleHintCache) -> Self {
        self.hints = Some(hints);
        self
    }

    pub fn hints(&self) -> Option<&RoleHintCache> {
        self.hints.as_ref()
    }

    /// Parses `raw` and resolves its role.
    ///
    /// Invalid input fails with [`AccessError::InvalidAddress`] before any
    /// contract call is made.
    pub async fn resolve_role(&self, raw: &str) -> Result<Role, AccessError> {
        let address = WalletAddress::parse(raw)?;
        self.resolve(&address).await
    }

    /// Resolves the role of an already parsed address.
    ///
    /// Concurrent calls for the same address share a single lookup.
    pub async fn resolve(&self, address: &WalletAddress) -> Result<Role, AccessError> {
        let cell = self.cell_for(address);
        match cell.get_or_try_init(|| self.lookup(address)).await {
            Ok(role) => Ok(*role),
            Err(error) => {
                self.discard_empty(address, &cell);
                Err(error)
            }
        }
    }

    /// Drops the memoized role of one address.
    pub fn forget(&self, address: &WalletAddress) {
        self.lock().remove(address);
    }

    /// Drops every memoized role.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Best guess without I/O: the memoized role, else a trusted hint.
    ///
    /// Only for display purposes. Access decisions go through [`resolve`].
    ///
    /// [`resolve`]: RoleResolver::resolve
    pub fn peek_role(&self, address: &WalletAddress) -> Option<Role> {
        let memoized = self
            .lock()
            .get(address)
            .and_then(|cell| cell.get().copied());

        memoized.or_else(|| self.hints.as_ref().and_then(|hints| hints.hint(address)))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<WalletAddress, Arc<OnceCell<Role>>>> {
        self.resolved.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cell_for(&self, address: &WalletAddress) -> Arc<OnceCell<Role>> {
        self.lock()
            .entry(*address)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Removes the entry for `address` if it is still `cell` and unset, so
    /// failed lookups of arbitrary input leave nothing behind.
    fn discard_empty(&self, address: &WalletAddress, cell: &Arc<OnceCell<Role>>) {
        let mut resolved = self.lock();
        let stale = resolved
            .get(address)
            .map_or(false, |current| Arc::ptr_eq(current, cell) && current.get().is_none());
        if stale {
            resolved.remove(address);
        }
    }

    #[cfg(test)]
    fn entries(&self) -> usize {
        self.lock().len()
    }

    async fn lookup(&self, address: &WalletAddress) -> Result<Role, AccessError> {
        tracing::debug!(%address, "Looking up wallet role on contract");

        let (venue, doorman) =
            futures::try_join!(self.contract.venue(), self.contract.doorman()).map_err(
                |source| {
                    tracing::warn!(%address, error = %source, "Role lookup failed");
                    AccessError::RoleLookup {
                        address: *address,
                        source,
                    }
                },
            )?;

        let assignment = RoleAssignment::new(venue, doorman);
        if let Some(hints) = &self.hints {
            hints.reconcile(&assignment);
        }

        let role = assignment.role_of(address);
        tracing::info!(%address, %role, "Resolved wallet role");
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockTicketContract;
    use crate::domain::contract::ContractError;
    use std::time::Duration;

    fn addr(byte: u8) -> WalletAddress {
        WalletAddress::from_bytes([byte; 20])
    }

    fn venue() -> WalletAddress {
        addr(0xaa)
    }

    fn doorman() -> WalletAddress {
        addr(0xbb)
    }

    fn setup() -> (Arc<MockTicketContract>, RoleResolver) {
        let contract = Arc::new(MockTicketContract::new(venue(), doorman()));
        let resolver = RoleResolver::new(contract.clone());
        (contract, resolver)
    }

    #[tokio::test]
    async fn resolves_each_role() {
        let (_, resolver) = setup();
        assert_eq!(resolver.resolve(&venue()).await.unwrap(), Role::Venue);
        assert_eq!(resolver.resolve(&doorman()).await.unwrap(), Role::Doorman);
        assert_eq!(resolver.resolve(&addr(1)).await.unwrap(), Role::Customer);
    }

    #[tokio::test]
    async fn casing_does_not_matter() {
        let (_, resolver) = setup();
        let upper = format!("0x{}", "AA".repeat(20));
        let lower = format!("0x{}", "aa".repeat(20));
        assert_eq!(resolver.resolve_role(&upper).await.unwrap(), Role::Venue);
        assert_eq!(resolver.resolve_role(&lower).await.unwrap(), Role::Venue);
    }

    #[tokio::test]
    async fn invalid_input_makes_no_contract_calls() {
        let (contract, resolver) = setup();
        for raw in ["", "   ", "0x123", "not an address", "0xZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ"] {
            let err = resolver.resolve_role(raw).await.unwrap_err();
            assert!(matches!(err, AccessError::InvalidAddress(_)), "{raw:?}");
        }
        assert_eq!(contract.reads(), 0);
    }

    #[tokio::test]
    async fn memoizes_successful_lookups() {
        let (contract, resolver) = setup();
        assert_eq!(resolver.resolve(&venue()).await.unwrap(), Role::Venue);
        assert_eq!(resolver.resolve(&venue()).await.unwrap(), Role::Venue);
        assert_eq!(contract.role_lookups(), 1);
    }

    #[tokio::test]
    async fn concurrent_resolutions_share_one_lookup() {
        let contract = Arc::new(
            MockTicketContract::new(venue(), doorman()).with_read_delay(Duration::from_millis(20)),
        );
        let resolver = RoleResolver::new(contract.clone());

        let who = doorman();
        let (a, b) = tokio::join!(resolver.resolve(&who), resolver.resolve(&who));
        assert_eq!(a.unwrap(), Role::Doorman);
        assert_eq!(b.unwrap(), Role::Doorman);
        assert_eq!(contract.role_lookups(), 1);
    }

    #[tokio::test]
    async fn lookup_failure_is_not_customer_and_not_memoized() {
        let contract = Arc::new(
            MockTicketContract::new(venue(), doorman())
                .with_error(ContractError::network("connection reset")),
        );
        let resolver = RoleResolver::new(contract.clone());

        let err = resolver.resolve(&addr(1)).await.unwrap_err();
        assert!(matches!(err, AccessError::RoleLookup { address, .. } if address == addr(1)));
        assert!(err.is_retryable());

        contract.clear_error();
        assert_eq!(resolver.resolve(&addr(1)).await.unwrap(), Role::Customer);
        assert_eq!(contract.role_lookups(), 2);
    }

    #[tokio::test]
    async fn failed_lookups_leave_no_entries() {
        let contract = Arc::new(
            MockTicketContract::new(venue(), doorman())
                .with_error(ContractError::network("connection reset")),
        );
        let resolver = RoleResolver::new(contract);

        for byte in 1..=16 {
            assert!(resolver.resolve(&addr(byte)).await.is_err());
        }
        assert_eq!(resolver.entries(), 0);
    }

    #[tokio::test]
    async fn successful_lookups_stay_memoized() {
        let (_, resolver) = setup();
        resolver.resolve(&venue()).await.unwrap();
        resolver.resolve(&addr(1)).await.unwrap();
        assert_eq!(resolver.entries(), 2);
    }

    #[tokio::test]
    async fn forget_forces_a_fresh_lookup() {
        let (contract, resolver) = setup();
        assert_eq!(resolver.resolve(&addr(1)).await.unwrap(), Role::Customer);

        contract.set_venue(addr(1));
        assert_eq!(resolver.resolve(&addr(1)).await.unwrap(), Role::Customer);

        resolver.forget(&addr(1));
        assert_eq!(resolver.resolve(&addr(1)).await.unwrap(), Role::Venue);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let (contract, resolver) = setup();
        resolver.resolve(&venue()).await.unwrap();
        resolver.resolve(&doorman()).await.unwrap();
        resolver.clear();
        resolver.resolve(&venue()).await.unwrap();
        assert_eq!(contract.role_lookups(), 3);
    }

    #[tokio::test]
    async fn peek_prefers_memoized_role_over_hints() {
        let (_, resolver) = setup();
        assert_eq!(resolver.peek_role(&venue()), None);

        resolver.resolve(&venue()).await.unwrap();
        assert_eq!(resolver.peek_role(&venue()), Some(Role::Venue));
    }

    #[tokio::test]
    async fn stale_hints_are_dropped_after_lookup() {
        let contract = Arc::new(MockTicketContract::new(venue(), doorman()));
        // Hints still name an old venue.
        let hints = RoleHintCache::new(
            RoleHintCache::hash_address(&addr(1)),
            RoleHintCache::hash_address(&doorman()),
        );
        let resolver = RoleResolver::new(contract).with_hints(hints);

        assert_eq!(resolver.peek_role(&addr(1)), Some(Role::Venue));
        assert_eq!(resolver.resolve(&addr(1)).await.unwrap(), Role::Customer);

        assert!(!resolver.hints().unwrap().is_trusted());
        assert_eq!(resolver.peek_role(&addr(2)), None);
        assert_eq!(resolver.peek_role(&addr(1)), Some(Role::Customer));
    }
}
