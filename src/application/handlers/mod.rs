//! Application handlers.
//!
//! Each handler takes its collaborators as `Arc<dyn Port>` and exposes an
//! async `handle`-style entry point per user operation.

mod connect_wallet;
mod create_wallet;
mod ticket_actions;
mod wallet_overview;

pub use connect_wallet::{ConnectError, ConnectOutcome, ConnectWalletHandler};
pub use create_wallet::{CreateWalletError, CreateWalletHandler, CreatedWallet, MIN_PASSWORD_LEN};
pub use ticket_actions::{ActionError, ActionOutcome, TicketActionsHandler, TicketCommand};
pub use wallet_overview::{
    CustomerOverview, OverviewError, TicketBalance, VenueOverview, WalletOverviewHandler,
};
