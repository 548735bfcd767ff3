//! Navigation routes and gated actions, each with its required roles.

use serde::{Deserialize, Serialize};

use super::{Role, RoleSet};

/// Pages of the ticketing front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    CreateWallet,
    /// Identity / connect entry point. Every denial redirects here.
    Identity,
    VenueWallet,
    DoormanWallet,
    CustomerWallet,
    BuyTicket,
    Refund,
    Watch,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::CreateWallet,
        Route::Identity,
        Route::VenueWallet,
        Route::DoormanWallet,
        Route::CustomerWallet,
        Route::BuyTicket,
        Route::Refund,
        Route::Watch,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::CreateWallet => "/create-wallet",
            Route::Identity => "/view-wallet-auth",
            Route::VenueWallet => "/view-wallet-venue",
            Route::DoormanWallet => "/view-wallet-doorman",
            Route::CustomerWallet => "/view-wallet-customer",
            Route::BuyTicket => "/buy-ticket",
            Route::Refund => "/refund",
            Route::Watch => "/watch",
        }
    }

    /// Looks a route up by path. The root path maps to the identity page.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(Route::Identity);
        }
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Roles allowed on this route, or `None` for public pages.
    pub fn required_roles(&self) -> Option<RoleSet> {
        match self {
            Route::CreateWallet | Route::Identity => None,
            Route::VenueWallet => Some(RoleSet::only(Role::Venue)),
            Route::DoormanWallet => Some(RoleSet::only(Role::Doorman)),
            Route::CustomerWallet | Route::BuyTicket | Route::Refund | Route::Watch => {
                Some(RoleSet::only(Role::Customer))
            }
        }
    }

    /// Wallet page a freshly identified wallet lands on.
    pub fn wallet_view_for(role: Role) -> Route {
        match role {
            Role::Venue => Route::VenueWallet,
            Role::Doorman => Route::DoormanWallet,
            Role::Customer => Route::CustomerWallet,
        }
    }
}

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    BuyTickets,
    RequestRefund,
    /// Watching the show consumes one ticket.
    ReturnTicket,
    ViewOwnWallet,
    InspectTicketBalance,
    WithdrawFunds,
    DepositFunds,
    UpdateTicketPrice,
    ViewVenueDashboard,
}

impl Action {
    pub fn required_roles(&self) -> RoleSet {
        match self {
            Action::BuyTickets
            | Action::RequestRefund
            | Action::ReturnTicket
            | Action::ViewOwnWallet => RoleSet::only(Role::Customer),
            Action::InspectTicketBalance => RoleSet::only(Role::Doorman),
            Action::WithdrawFunds
            | Action::DepositFunds
            | Action::UpdateTicketPrice
            | Action::ViewVenueDashboard => RoleSet::only(Role::Venue),
        }
    }

    /// Whether the action submits a transaction.
    pub fn is_transaction(&self) -> bool {
        !matches!(
            self,
            Action::ViewOwnWallet | Action::InspectTicketBalance | Action::ViewVenueDashboard
        )
    }
}
