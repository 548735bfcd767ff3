//! TicketActionsHandler - the six write calls of the ticket contract.
//!
//! Every command is checked in the same order: role, signing ability,
//! duplicate submission, input, balances. Only then is a transaction built
//! and handed to the sender. Results that arrive after the user left the
//! navigation context are discarded.

use std::sync::Arc;

use ethers::types::U256;
use thiserror::Error;

use crate::application::{ActionLatch, SessionScope};
use crate::domain::access::{require_action, AccessError, Action, Session};
use crate::domain::contract::{
    ContractCall, ContractError, TransactionRequest, TxHash, DEFAULT_GAS_LIMIT,
};
use crate::domain::foundation::{ErrorCode, Wei};
use crate::ports::{TicketContractReader, TransactionSender};

/// Revert reason the contract gives when it cannot cover a refund.
const REFUND_SHORTFALL_REVERT: &str = "Not enough balance to give a refund";

/// A user-initiated contract write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCommand {
    BuyTickets { quantity: u64 },
    RequestRefund { quantity: u64 },
    /// Consumes tickets, e.g. when watching the show.
    ReturnTicket { quantity: u64 },
    WithdrawFunds { amount: Wei },
    DepositFunds { amount: Wei },
    UpdateTicketPrice { new_price: Wei },
}

impl TicketCommand {
    pub fn action(&self) -> Action {
        match self {
            TicketCommand::BuyTickets { .. } => Action::BuyTickets,
            TicketCommand::RequestRefund { .. } => Action::RequestRefund,
            TicketCommand::ReturnTicket { .. } => Action::ReturnTicket,
            TicketCommand::WithdrawFunds { .. } => Action::WithdrawFunds,
            TicketCommand::DepositFunds { .. } => Action::DepositFunds,
            TicketCommand::UpdateTicketPrice { .. } => Action::UpdateTicketPrice,
        }
    }
}

/// Result of a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Submitted(TxHash),
    /// The user navigated away before the command finished.
    Discarded,
}

impl ActionOutcome {
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            ActionOutcome::Submitted(hash) => Some(*hash),
            ActionOutcome::Discarded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Another transaction is already pending")]
    AlreadyPending,

    #[error("This wallet connection cannot sign transactions")]
    SigningUnavailable,

    #[error("Ticket quantity must be at least 1")]
    InvalidQuantity,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Requested {requested} tickets but only {available} are held")]
    InsufficientTickets { requested: u64, available: U256 },

    #[error("Cannot withdraw {requested}; the contract holds {available}")]
    InsufficientContractBalance { requested: Wei, available: Wei },

    #[error("Cannot deposit {requested}; the wallet holds {available}")]
    InsufficientWalletBalance { requested: Wei, available: Wei },

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl ActionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ActionError::AlreadyPending => ErrorCode::ActionPending,
            ActionError::SigningUnavailable => ErrorCode::SigningUnavailable,
            ActionError::InvalidQuantity => ErrorCode::InvalidQuantity,
            ActionError::InvalidAmount => ErrorCode::InvalidAmount,
            ActionError::InsufficientTickets { .. }
            | ActionError::InsufficientContractBalance { .. }
            | ActionError::InsufficientWalletBalance { .. } => ErrorCode::InsufficientFunds,
            ActionError::Access(err) => err.code(),
            ActionError::Contract(err) => err.code(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ActionError::AlreadyPending => "Please wait for the pending transaction.".to_string(),
            ActionError::SigningUnavailable => {
                "Connect with your wallet extension or keystore file to send transactions."
                    .to_string()
            }
            ActionError::InvalidQuantity => "Please choose at least one ticket.".to_string(),
            ActionError::InvalidAmount => "Please enter a valid amount.".to_string(),
            ActionError::InsufficientTickets { available, .. } => {
                format!("You only have {} ticket(s).", available)
            }
            ActionError::InsufficientContractBalance { .. } => {
                "Cannot withdraw more than the contract balance.".to_string()
            }
            ActionError::InsufficientWalletBalance { .. } => {
                "Cannot deposit more than your wallet balance.".to_string()
            }
            ActionError::Access(err) => err.user_message(),
            ActionError::Contract(ContractError::Reverted(reason))
                if reason.contains(REFUND_SHORTFALL_REVERT) =>
            {
                "The venue appears to have withdrawn funds from the contract, so there is not \
                 enough ETH left to process your refund. Please contact the venue."
                    .to_string()
            }
            ActionError::Contract(err) => format!("Transaction failed: {}", err),
        }
    }
}

/// Handler for ticket contract writes.
pub struct TicketActionsHandler {
    reader: Arc<dyn TicketContractReader>,
    sender: Arc<dyn TransactionSender>,
    scope: Arc<SessionScope>,
    gas_limit: u64,
    latch: ActionLatch,
}

impl TicketActionsHandler {
    pub fn new(
        reader: Arc<dyn TicketContractReader>,
        sender: Arc<dyn TransactionSender>,
        scope: Arc<SessionScope>,
    ) -> Self {
        Self {
            reader,
            sender,
            scope,
            gas_limit: DEFAULT_GAS_LIMIT,
            latch: ActionLatch::new(),
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub async fn handle(
        &self,
        session: Option<&Session>,
        command: TicketCommand,
    ) -> Result<ActionOutcome, ActionError> {
        let ticket = self.scope.begin();
        let session = require_action(session, command.action())?;
        if !session.can_sign() {
            return Err(ActionError::SigningUnavailable);
        }

        let _pending = self.latch.try_acquire().ok_or(ActionError::AlreadyPending)?;

        let (call, value) = self.prepare(session, command).await?;
        if !self.scope.is_active(ticket) {
            tracing::debug!(from = %session.address(), "Left before sending; dropping command");
            return Ok(ActionOutcome::Discarded);
        }

        let tx = TransactionRequest::for_call(*session.address(), self.reader.address(), call)
            .with_value(value)
            .with_gas(self.gas_limit)
            .signed_by(session.signer().cloned());

        let result = self.sender.send_transaction(&tx).await;
        if !self.scope.is_active(ticket) {
            tracing::info!(
                from = %session.address(),
                function = call.signature(),
                submitted = result.is_ok(),
                "Transaction finished after navigation; result discarded"
            );
            return Ok(ActionOutcome::Discarded);
        }

        let hash = result?;
        tracing::info!(
            from = %session.address(),
            function = call.signature(),
            value = %value,
            tx_hash = %hash,
            "Submitted ticket contract transaction"
        );
        Ok(ActionOutcome::Submitted(hash))
    }

    /// Validates the command and returns the call with its attached value.
    async fn prepare(
        &self,
        session: &Session,
        command: TicketCommand,
    ) -> Result<(ContractCall, Wei), ActionError> {
        match command {
            TicketCommand::BuyTickets { quantity } => {
                require_quantity(quantity)?;
                let price = self.reader.ticket_price().await?;
                let total = price
                    .checked_mul(quantity)
                    .ok_or(ActionError::InvalidAmount)?;
                Ok((ContractCall::BuyTicket { quantity }, total))
            }
            TicketCommand::RequestRefund { quantity } => {
                self.require_tickets(session, quantity).await?;
                Ok((ContractCall::GetRefund { quantity }, Wei::ZERO))
            }
            TicketCommand::ReturnTicket { quantity } => {
                self.require_tickets(session, quantity).await?;
                Ok((ContractCall::ReturnTicket { quantity }, Wei::ZERO))
            }
            TicketCommand::WithdrawFunds { amount } => {
                require_amount(amount)?;
                let available = self.reader.ether_balance(&self.reader.address()).await?;
                if amount > available {
                    return Err(ActionError::InsufficientContractBalance {
                        requested: amount,
                        available,
                    });
                }
                Ok((ContractCall::WithdrawFunds { amount }, Wei::ZERO))
            }
            TicketCommand::DepositFunds { amount } => {
                require_amount(amount)?;
                let available = self.reader.ether_balance(session.address()).await?;
                if amount > available {
                    return Err(ActionError::InsufficientWalletBalance {
                        requested: amount,
                        available,
                    });
                }
                Ok((ContractCall::DepositFunds, amount))
            }
            TicketCommand::UpdateTicketPrice { new_price } => {
                require_amount(new_price)?;
                Ok((ContractCall::UpdateTicketPrice { new_price }, Wei::ZERO))
            }
        }
    }

    async fn require_tickets(&self, session: &Session, quantity: u64) -> Result<(), ActionError> {
        require_quantity(quantity)?;
        let balance = self.reader.balance_of(session.address()).await?;
        // Ticket tokens carry 18 decimals; only whole tickets can be spent.
        let available = balance.whole_units();
        if U256::from(quantity) > available {
            return Err(ActionError::InsufficientTickets {
                requested: quantity,
                available,
            });
        }
        Ok(())
    }
}

fn require_quantity(quantity: u64) -> Result<(), ActionError> {
    if quantity == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    Ok(())
}

fn require_amount(amount: Wei) -> Result<(), ActionError> {
    if amount.is_zero() {
        return Err(ActionError::InvalidAmount);
    }
    Ok(())
}
