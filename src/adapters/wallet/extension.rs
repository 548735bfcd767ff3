//! Browser-extension style connector.
//!
//! Asks an EIP-1193 compatible endpoint for account access with
//! `eth_requestAccounts` and takes the first account offered.

use async_trait::async_trait;
use ethers::providers::{MiddlewareError, ProviderError};
use std::sync::Arc;

use crate::adapters::rpc::RpcProvider;
use crate::domain::access::ConnectionMethod;
use crate::domain::foundation::WalletAddress;
use crate::ports::{ConnectedWallet, WalletConnector, WalletError};

/// EIP-1193 "user rejected request" error code.
const USER_REJECTED: i64 = 4001;

pub struct ExtensionWalletConnector {
    provider: Arc<RpcProvider>,
}

impl ExtensionWalletConnector {
    pub fn new(provider: Arc<RpcProvider>) -> Self {
        Self { provider }
    }
}

fn map_provider_error(error: ProviderError) -> WalletError {
    match error.as_error_response() {
        Some(response) if response.code == USER_REJECTED => WalletError::Rejected,
        _ => WalletError::Unavailable(error.to_string()),
    }
}

/// Picks the first account from an `eth_requestAccounts` result.
fn first_account(accounts: &[String]) -> Result<WalletAddress, WalletError> {
    let first = accounts.first().ok_or(WalletError::NoAccounts)?;
    Ok(WalletAddress::parse(first)?)
}

#[async_trait]
impl WalletConnector for ExtensionWalletConnector {
    fn method(&self) -> ConnectionMethod {
        ConnectionMethod::BrowserExtension
    }

    async fn connect(&self) -> Result<ConnectedWallet, WalletError> {
        let accounts: Vec<String> = self
            .provider
            .request("eth_requestAccounts", ())
            .await
            .map_err(map_provider_error)?;

        let address = first_account(&accounts)?;
        tracing::debug!(%address, offered = accounts.len(), "Extension granted account access");

        Ok(ConnectedWallet::new(address, ConnectionMethod::BrowserExtension))
    }
}
