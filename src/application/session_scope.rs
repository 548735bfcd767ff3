//! The session of one navigation context.
//!
//! Connecting a wallet and resolving its role take a while. If the user
//! navigates away in the meantime, the late result must not revive the
//! session. `begin` hands out a ticket stamped with the current generation;
//! `leave` bumps the generation, so any ticket issued before it is stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::domain::access::Session;

/// Proof that an operation started in the current navigation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTicket(u64);

impl NavigationTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SessionScope {
    generation: AtomicU64,
    current: RwLock<Option<Session>>,
}

impl SessionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> NavigationTicket {
        NavigationTicket(self.generation.load(Ordering::SeqCst))
    }

    /// Stores `session` if `ticket` is still current.
    ///
    /// Returns `false` and drops the session when the user left after the
    /// ticket was issued.
    pub fn establish(&self, ticket: NavigationTicket, session: Session) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Checked under the write lock so a concurrent leave() cannot interleave.
        if self.generation.load(Ordering::SeqCst) != ticket.0 {
            tracing::debug!(
                address = %session.address(),
                "Discarding session resolved after navigation"
            );
            return false;
        }
        *current = Some(session);
        true
    }

    /// Leaves the authenticated flow, invalidating outstanding tickets.
    pub fn leave(&self) -> Option<Session> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::SeqCst);
        current.take()
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_active(&self, ticket: NavigationTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}
