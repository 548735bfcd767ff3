//! WalletOverviewHandler - read-only views for each role's wallet page.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::access::{require_action, AccessError, Action, Session};
use crate::domain::contract::ContractError;
use crate::domain::foundation::{ErrorCode, WalletAddress, Wei};
use crate::ports::TicketContractReader;

/// What a customer sees on their wallet page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerOverview {
    pub address: WalletAddress,
    pub tickets: Wei,
    pub ether_balance: Wei,
    pub ticket_price: Wei,
}

/// Ticket balance of a wallet, as checked at the door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketBalance {
    pub address: WalletAddress,
    pub tickets: Wei,
}

impl TicketBalance {
    pub fn has_ticket(&self) -> bool {
        !self.tickets.is_zero()
    }
}

/// Contract-wide figures for the venue dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueOverview {
    pub ticket_price: Wei,
    pub total_tokens_sold: Wei,
    pub total_supply: Wei,
    pub contract_balance: Wei,
    pub venue_balance: Wei,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverviewError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl OverviewError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OverviewError::Access(err) => err.code(),
            OverviewError::Contract(err) => err.code(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            OverviewError::Access(err) => err.user_message(),
            OverviewError::Contract(_) => "Failed to fetch balances.".to_string(),
        }
    }
}

pub struct WalletOverviewHandler {
    reader: Arc<dyn TicketContractReader>,
}

impl WalletOverviewHandler {
    pub fn new(reader: Arc<dyn TicketContractReader>) -> Self {
        Self { reader }
    }

    pub async fn customer_overview(
        &self,
        session: Option<&Session>,
    ) -> Result<CustomerOverview, OverviewError> {
        let session = require_action(session, Action::ViewOwnWallet)?;
        let address = *session.address();

        let (tickets, ether_balance, ticket_price) = futures::try_join!(
            self.reader.balance_of(&address),
            self.reader.ether_balance(&address),
            self.reader.ticket_price(),
        )?;

        Ok(CustomerOverview {
            address,
            tickets,
            ether_balance,
            ticket_price,
        })
    }

    /// Doorman lookup of someone else's ticket balance.
    pub async fn inspect_ticket_balance(
        &self,
        session: Option<&Session>,
        raw_address: &str,
    ) -> Result<TicketBalance, OverviewError> {
        require_action(session, Action::InspectTicketBalance)?;
        let address = WalletAddress::parse(raw_address).map_err(AccessError::from)?;

        let tickets = self.reader.balance_of(&address).await?;
        tracing::debug!(%address, %tickets, "Inspected ticket balance");
        Ok(TicketBalance { address, tickets })
    }

    pub async fn venue_overview(
        &self,
        session: Option<&Session>,
    ) -> Result<VenueOverview, OverviewError> {
        let session = require_action(session, Action::ViewVenueDashboard)?;
        let contract = self.reader.address();

        let (ticket_price, total_tokens_sold, total_supply, contract_balance, venue_balance) =
            futures::try_join!(
                self.reader.ticket_price(),
                self.reader.total_tokens_sold(),
                self.reader.total_supply(),
                self.reader.ether_balance(&contract),
                self.reader.ether_balance(session.address()),
            )?;

        Ok(VenueOverview {
            ticket_price,
            total_tokens_sold,
            total_supply,
            contract_balance,
            venue_balance,
        })
    }
}
