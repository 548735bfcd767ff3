//! Transaction requests and hashes.

use ethers::types::H256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::abi::ContractCall;
use super::{ContractError, LocalSigner};
use crate::domain::foundation::{WalletAddress, Wei};

/// Gas limit attached to every ticket contract transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// A transaction to the ticket contract.
///
/// Without a signer the node behind the RPC endpoint signs for `from`
/// (`eth_sendTransaction`). With one, the transaction is signed in-process
/// and broadcast raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: WalletAddress,
    pub to: WalletAddress,
    pub value: Wei,
    pub gas: u64,
    pub call: ContractCall,
    pub signer: Option<LocalSigner>,
}

impl TransactionRequest {
    /// Builds a transaction for `call` sent to `contract`.
    pub fn for_call(from: WalletAddress, contract: WalletAddress, call: ContractCall) -> Self {
        Self {
            from,
            to: contract,
            value: Wei::ZERO,
            gas: DEFAULT_GAS_LIMIT,
            call,
            signer: None,
        }
    }

    pub fn with_value(mut self, value: Wei) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn signed_by(mut self, signer: Option<LocalSigner>) -> Self {
        self.signer = signer;
        self
    }

    /// ABI-encoded calldata.
    pub fn data(&self) -> Vec<u8> {
        self.call.encode()
    }
}

/// Hash of a submitted transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxHash(H256);

impl TxHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_fixed_bytes()
    }
}

impl From<H256> for TxHash {
    fn from(hash: H256) -> Self {
        Self(hash)
    }
}

impl FromStr for TxHash {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| ContractError::decode("transaction hash missing 0x prefix"))?;
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ContractError::decode(format!("invalid transaction hash: {}", e)))?;
        Ok(Self::from_bytes(bytes))
    }
}

impl TryFrom<String> for TxHash {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TxHash> for String {
    fn from(hash: TxHash) -> Self {
        hash.to_string()
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self)
    }
}
