//! HTTP JSON-RPC provider construction.
//!
//! One explicitly constructed provider is shared (via `Arc`) by the
//! contract adapter and the extension wallet connector. Nothing here is
//! global.

use ethers::providers::{Http, Provider};
use reqwest::Url;
use std::time::Duration;

use crate::config::ChainConfig;
use crate::domain::contract::ContractError;

/// Provider type used by every RPC adapter.
pub type RpcProvider = Provider<Http>;

/// Connection settings for a JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Endpoint URL (may embed a provider API key).
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Chain id for locally signed transactions; asked from the node when unset.
    pub chain_id: Option<u64>,
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            chain_id: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Builds a provider whose HTTP client enforces the request timeout.
    pub fn connect(&self) -> Result<RpcProvider, ContractError> {
        let url = Url::parse(&self.url)
            .map_err(|e| ContractError::network(format!("Invalid RPC URL: {}", e)))?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ContractError::network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(timeout_secs = self.timeout.as_secs(), "RPC provider created");

        Ok(Provider::new(Http::new_with_client(url, client)))
    }
}

impl From<&ChainConfig> for RpcConfig {
    fn from(config: &ChainConfig) -> Self {
        let rpc = RpcConfig::new(config.rpc_url.clone()).with_timeout(config.request_timeout());
        match config.chain_id {
            Some(id) => rpc.with_chain_id(id),
            None => rpc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_thirty_second_timeout() {
        let config = RpcConfig::new("http://localhost:8545");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.chain_id, None);
    }

    #[test]
    fn takes_settings_from_chain_config() {
        let mut chain = ChainConfig::new(
            "http://localhost:8545",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        );
        chain.request_timeout_secs = 5;
        chain.chain_id = Some(1337);

        let config = RpcConfig::from(&chain);
        assert_eq!(config.url, "http://localhost:8545");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.chain_id, Some(1337));
    }

    #[test]
    fn connects_to_valid_url() {
        assert!(RpcConfig::new("http://127.0.0.1:8545").connect().is_ok());
    }

    #[test]
    fn invalid_url_is_network_error() {
        assert!(matches!(
            RpcConfig::new("not a url").connect(),
            Err(ContractError::Network(msg)) if msg.contains("Invalid RPC URL")
        ));
    }
}
