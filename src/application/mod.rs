//! Application layer - role resolution, session state and handlers.
//!
//! Orchestrates the domain rules over the contract and wallet ports. One set
//! of these objects is built per navigation context; adapters may be shared.

pub mod handlers;
mod latch;
mod role_hints;
mod role_resolver;
mod session_scope;

pub use handlers::{
    ActionError, ActionOutcome, ConnectError, ConnectOutcome, ConnectWalletHandler,
    CreateWalletError, CreateWalletHandler, CreatedWallet, CustomerOverview, OverviewError, TicketActionsHandler, TicketBalance, TicketCommand, VenueOverview,
    WalletOverviewHandler,
};
pub use latch::{ActionLatch, LatchGuard};
pub use role_hints::RoleHintCache;
pub use role_resolver::RoleResolver;
pub use session_scope::{NavigationTicket, SessionScope};
