//! Route and action guard.
//!
//! `authorize` is a pure precondition check over an already-resolved
//! session. Role resolution and any other I/O happen upstream.
//!
//! Every denial redirects to the identity entry point with a generic message.
//! The message never names the detected role.

use super::{AccessError, Action, Role, RoleSet, Route, Session};

/// Shown on every redirect, whether no wallet is connected or the connected
/// one is not allowed.
pub const REDIRECT_MESSAGE: &str = "Connect an authorized wallet to continue.";

/// Where to send the user and what to tell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub target: Route,
    pub message: &'static str,
}

impl Redirect {
    fn to_identity() -> Self {
        Self {
            target: Route::Identity,
            message: REDIRECT_MESSAGE,
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allow,
    Redirect(Redirect),
}

impl Authorization {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Authorization::Allow)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Authorization::Redirect(_))
    }

    /// Converts a redirect into [`AccessError::AuthorizationDenied`].
    pub fn into_result(self) -> Result<(), AccessError> {
        match self {
            Authorization::Allow => Ok(()),
            Authorization::Redirect(redirect) => Err(AccessError::AuthorizationDenied { redirect }),
        }
    }
}

/// Checks a session against the roles a page or action requires.
pub fn authorize(session: Option<&Session>, required: impl Into<RoleSet>) -> Authorization {
    let Some(session) = session else {
        return Authorization::Redirect(Redirect::to_identity());
    };

    if required.into().contains(session.role()) {
        Authorization::Allow
    } else {
        Authorization::Redirect(Redirect::to_identity())
    }
}

pub fn authorize_action(session: Option<&Session>, action: Action) -> Authorization {
    authorize(session, action.required_roles())
}

/// Public routes always allow; gated routes defer to [`authorize`].
pub fn authorize_route(session: Option<&Session>, route: Route) -> Authorization {
    match route.required_roles() {
        None => Authorization::Allow,
        Some(required) => authorize(session, required),
    }
}

/// Like [`authorize_action`], but hands back the session on success.
pub fn require_action(session: Option<&Session>, action: Action) -> Result<&Session, AccessError> {
    match session {
        Some(session) => {
            authorize_action(Some(session), action).into_result()?;
            Ok(session)
        }
        None => Err(AccessError::AuthorizationDenied {
            redirect: Redirect::to_identity(),
        }),
    }
}

/// Convenience for callers that only hold a role.
pub fn role_permits(role: Role, required: impl Into<RoleSet>) -> bool {
    required.into().contains(role)
}
