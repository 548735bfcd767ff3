//! ConnectWalletHandler - connect, resolve the role, open the session.

use std::sync::Arc;

use thiserror::Error;

use crate::application::{ActionLatch, RoleResolver, SessionScope};
use crate::domain::access::{AccessError, Route, Session};
use crate::domain::foundation::ErrorCode;
use crate::ports::{WalletConnector, WalletError};

/// Result of a connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The session is active and the user should land on `landing`.
    Established { session: Session, landing: Route },
    /// The user navigated away before the role was known.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("A connection attempt is already in progress")]
    AlreadyPending,

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl ConnectError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConnectError::AlreadyPending => ErrorCode::ActionPending,
            ConnectError::Wallet(err) => err.code(),
            ConnectError::Access(err) => err.code(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ConnectError::AlreadyPending => "Already connecting, please wait.".to_string(),
            ConnectError::Wallet(err) => err.user_message(),
            ConnectError::Access(err) => err.user_message(),
        }
    }
}

/// Handler for connecting a wallet in one navigation context.
pub struct ConnectWalletHandler {
    resolver: Arc<RoleResolver>,
    scope: Arc<SessionScope>,
    latch: ActionLatch,
}

impl ConnectWalletHandler {
    pub fn new(resolver: Arc<RoleResolver>, scope: Arc<SessionScope>) -> Self {
        Self {
            resolver,
            scope,
            latch: ActionLatch::new(),
        }
    }

    pub async fn handle(&self, connector: &dyn WalletConnector) -> Result<ConnectOutcome, ConnectError> {
        let _pending = self.latch.try_acquire().ok_or(ConnectError::AlreadyPending)?;
        let ticket = self.scope.begin();

        let wallet = connector.connect().await?;
        let role = self.resolver.resolve(&wallet.address).await?;

        let session = Session::new(wallet.address, role, wallet.method).with_signer(wallet.signer);
        if !self.scope.establish(ticket, session.clone()) {
            return Ok(ConnectOutcome::Discarded);
        }

        tracing::info!(
            address = %wallet.address,
            %role,
            method = ?wallet.method,
            "Wallet session established"
        );

        Ok(ConnectOutcome::Established {
            session,
            landing: Route::wallet_view_for(role),
        })
    }

    /// Ends the session and forgets its memoized role.
    pub fn disconnect(&self) -> Option<Session> {
        let session = self.scope.leave()?;
        self.resolver.forget(session.address());
        tracing::info!(address = %session.address(), "Wallet disconnected");
        Some(session)
    }
}
