//! Locally held signing key.

use ethers::signers::{LocalWallet, Signer};
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::WalletAddress;

/// A decrypted wallet that signs transactions in-process.
///
/// Shared behind an `Arc` so sessions and transaction requests can carry it
/// cheaply. Two signers are equal when they sign for the same address.
#[derive(Clone)]
pub struct LocalSigner(Arc<LocalWallet>);

impl LocalSigner {
    pub fn new(wallet: LocalWallet) -> Self {
        Self(Arc::new(wallet))
    }

    pub fn address(&self) -> WalletAddress {
        self.0.address().into()
    }

    pub fn wallet(&self) -> &LocalWallet {
        &self.0
    }
}

impl PartialEq for LocalSigner {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for LocalSigner {}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalSigner({})", self.address().to_lower_hex())
    }
}
