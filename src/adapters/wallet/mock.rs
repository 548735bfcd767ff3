//! In-memory wallet connector for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::access::ConnectionMethod;
use crate::domain::contract::LocalSigner;
use crate::domain::foundation::WalletAddress;
use crate::ports::{ConnectedWallet, WalletConnector, WalletError};

/// Connector returning a preset result, optionally after a delay.
pub struct MockWalletConnector {
    method: ConnectionMethod,
    result: Mutex<Result<ConnectedWallet, WalletError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockWalletConnector {
    pub fn new(address: WalletAddress, method: ConnectionMethod) -> Self {
        Self {
            method,
            result: Mutex::new(Ok(ConnectedWallet::new(address, method))),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A browser-extension connector that can sign.
    pub fn signing(address: WalletAddress) -> Self {
        Self::new(address, ConnectionMethod::BrowserExtension)
    }

    /// A keystore connector that hands out an already decrypted key.
    pub fn unlocked(signer: LocalSigner) -> Self {
        Self {
            method: ConnectionMethod::Keystore,
            result: Mutex::new(Ok(ConnectedWallet::unlocked(signer))),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A connector that always fails with `error`.
    pub fn failing(error: WalletError) -> Self {
        Self {
            method: ConnectionMethod::BrowserExtension,
            result: Mutex::new(Err(error)),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Switches the account the wallet reports.
    pub fn set_address(&self, address: WalletAddress) {
        *self.result.lock().unwrap() = Ok(ConnectedWallet::new(address, self.method));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletConnector for MockWalletConnector {
    fn method(&self) -> ConnectionMethod {
        self.method
    }

    async fn connect(&self) -> Result<ConnectedWallet, WalletError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.result.lock().unwrap().clone()
    }
}
