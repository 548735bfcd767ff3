//! CreateWalletHandler - generate a key and store it as a V3 keystore.
//!
//! The new keystore can be used right away with the keystore connector.

use std::path::PathBuf;

use ethers::core::rand::thread_rng;
use ethers::signers::{LocalWallet, Signer};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::{ErrorCode, WalletAddress};

/// Shortest accepted password, counted after trimming.
pub const MIN_PASSWORD_LEN: usize = 3;

/// A freshly generated wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedWallet {
    pub address: WalletAddress,
    /// The encrypted keystore file.
    pub keystore: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateWalletError {
    #[error("Password must be at least {} characters long", MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("Failed to write keystore: {0}")]
    Keystore(String),
}

impl CreateWalletError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CreateWalletError::PasswordTooShort => ErrorCode::WeakPassword,
            CreateWalletError::Keystore(_) => ErrorCode::InternalError,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            CreateWalletError::PasswordTooShort => format!(
                "Your password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ),
            CreateWalletError::Keystore(reason) => {
                format!("Uh oh there was an issue: {}", reason)
            }
        }
    }
}

/// Writes new keystores into one directory.
#[derive(Debug, Clone)]
pub struct CreateWalletHandler {
    dir: PathBuf,
}

impl CreateWalletHandler {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn handle(&self, password: &str) -> Result<CreatedWallet, CreateWalletError> {
        if password.trim().chars().count() < MIN_PASSWORD_LEN {
            return Err(CreateWalletError::PasswordTooShort);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CreateWalletError::Keystore(e.to_string()))?;

        let dir = self.dir.clone();
        let name = format!("keystore-{}.json", Uuid::new_v4());
        let password = Secret::new(password.to_string());
        let wallet = {
            let name = name.clone();
            tokio::task::spawn_blocking(move || {
                let mut rng = thread_rng();
                LocalWallet::new_keystore(&dir, &mut rng, password.expose_secret(), Some(name.as_str()))
                    .map(|(wallet, _)| wallet)
            })
            .await
            .map_err(|e| CreateWalletError::Keystore(e.to_string()))?
            .map_err(|e| CreateWalletError::Keystore(e.to_string()))?
        };

        let created = CreatedWallet {
            address: wallet.address().into(),
            keystore: self.dir.join(name),
        };
        tracing::info!(
            address = %created.address,
            keystore = %created.keystore.display(),
            "Wallet created"
        );
        Ok(created)
    }
}
