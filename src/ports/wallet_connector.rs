//! Wallet connector port.
//!
//! A connector supplies the address of the user's wallet, either from a
//! browser extension, an encrypted keystore file or plain address entry.
//! Role resolution and the guard do not care which one was used.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::access::ConnectionMethod;
use crate::domain::contract::LocalSigner;
use crate::domain::foundation::{ErrorCode, ValidationError, WalletAddress};

/// Result of a successful connection.
///
/// `signer` is set only when the private key was decrypted locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedWallet {
    pub address: WalletAddress,
    pub method: ConnectionMethod,
    pub signer: Option<LocalSigner>,
}

impl ConnectedWallet {
    /// A connection whose signing, if any, happens outside this process.
    pub fn new(address: WalletAddress, method: ConnectionMethod) -> Self {
        Self {
            address,
            method,
            signer: None,
        }
    }

    /// A keystore connection holding the decrypted key.
    pub fn unlocked(signer: LocalSigner) -> Self {
        Self {
            address: signer.address(),
            method: ConnectionMethod::Keystore,
            signer: Some(signer),
        }
    }
}

/// Errors raised while connecting a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Wallet provider unavailable: {0}")]
    Unavailable(String),

    #[error("Connection request was rejected")]
    Rejected,

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Wallet returned an invalid address: {0}")]
    InvalidAddress(#[from] ValidationError),

    #[error("Keystore error: {0}")]
    Keystore(String),

    #[error("Wallet password is required")]
    MissingPassword,
}

impl WalletError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WalletError::Unavailable(_) | WalletError::NoAccounts => ErrorCode::WalletUnavailable,
            WalletError::Rejected => ErrorCode::WalletRejected,
            WalletError::InvalidAddress(_) => ErrorCode::InvalidAddress,
            WalletError::Keystore(_) | WalletError::MissingPassword => ErrorCode::WalletUnavailable,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            WalletError::Unavailable(_) => {
                "Wallet provider is not available. Please install or unlock it.".to_string()
            }
            WalletError::Rejected => "Connection request was rejected in your wallet.".to_string(),
            WalletError::NoAccounts => "Your wallet did not share any accounts.".to_string(),
            WalletError::InvalidAddress(_) => "Please enter a valid wallet address.".to_string(),
            WalletError::Keystore(_) => {
                "Failed to read wallet. Please check your password and file.".to_string()
            }
            WalletError::MissingPassword => "Please enter your wallet password.".to_string(),
        }
    }
}

/// Supplies a wallet address and, depending on the method, signing ability.
///
/// Keystore connectors must decrypt the key and return it as the signer; a
/// wrong password is a [`WalletError::Keystore`], never a connected wallet.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn method(&self) -> ConnectionMethod;

    async fn connect(&self) -> Result<ConnectedWallet, WalletError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_by_variant() {
        assert_eq!(WalletError::Rejected.code(), ErrorCode::WalletRejected);
        assert_eq!(WalletError::NoAccounts.code(), ErrorCode::WalletUnavailable);
        assert_eq!(
            WalletError::from(ValidationError::empty_field("address")).code(),
            ErrorCode::InvalidAddress
        );
    }

    #[test]
    fn messages_are_user_facing() {
        assert!(WalletError::MissingPassword.user_message().contains("password"));
        assert!(WalletError::Rejected.user_message().contains("rejected"));
    }

    #[test]
    fn connector_is_object_safe() {
        fn _accepts_dyn(_connector: &dyn WalletConnector) {}
    }
}
