//! Chain configuration: where the node is and which contract to talk to

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::contract::DEFAULT_GAS_LIMIT;
use crate::domain::foundation::WalletAddress;

/// Chain configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of the node or wallet provider
    pub rpc_url: String,

    /// Address of the deployed ticket contract
    pub contract_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Gas limit attached to every transaction
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// EIP-155 chain id for locally signed transactions; asked from the
    /// node when unset
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Environment name
    #[serde(default)]
    pub environment: Environment,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ChainConfig {
    pub fn new(rpc_url: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            contract_address: contract_address.into(),
            request_timeout_secs: default_request_timeout(),
            gas_limit: default_gas_limit(),
            chain_id: None,
            environment: Environment::default(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed contract address; mixed-case values must carry a valid checksum
    pub fn contract_address(&self) -> Result<WalletAddress, ValidationError> {
        WalletAddress::parse_checksummed(&self.contract_address)
            .map_err(|e| ValidationError::InvalidContractAddress(e.to_string()))
    }

    /// Validate chain configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rpc_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("chain.rpc_url"));
        }
        let is_https = self.rpc_url.starts_with("https://");
        if !is_https && !self.rpc_url.starts_with("http://") {
            return Err(ValidationError::InvalidRpcUrl);
        }
        if self.is_production() && !is_https {
            return Err(ValidationError::RpcUrlMustBeHttps);
        }

        if self.contract_address.trim().is_empty() {
            return Err(ValidationError::MissingRequired("chain.contract_address"));
        }
        self.contract_address()?;

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.gas_limit == 0 {
            return Err(ValidationError::InvalidGasLimit);
        }
        if self.chain_id == Some(0) {
            return Err(ValidationError::InvalidChainId);
        }
        Ok(())
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}
