//! Access module - roles, sessions and the route/action guard.
//!
//! # Module Structure
//!
//! - `role` - Role, RoleSet and the on-chain RoleAssignment
//! - `session` - Session and ConnectionMethod
//! - `route` - Routes and gated actions with their role requirements
//! - `guard` - Pure authorization checks
//! - `errors` - AccessError taxonomy

mod errors;
mod guard;
mod role;
mod route;
mod session;

pub use errors::AccessError;
pub use guard::{
    authorize, authorize_action, authorize_route, require_action, role_permits, Authorization,
    Redirect, REDIRECT_MESSAGE,
};
pub use role::{Role, RoleAssignment, RoleSet};
pub use route::{Action, Route};
pub use session::{ConnectionMethod, Session};
