//! Encrypted keystore (Web3 secret storage V3) connector.
//!
//! The keystore is checked, then decrypted with the user's password. The
//! decrypted key stays in process as a [`LocalSigner`] so transactions from
//! this wallet are signed locally. The password is never logged.

use async_trait::async_trait;
use ethers::signers::LocalWallet;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::domain::access::ConnectionMethod;
use crate::domain::contract::LocalSigner;
use crate::domain::foundation::WalletAddress;
use crate::ports::{ConnectedWallet, WalletConnector, WalletError};

#[derive(Debug, Deserialize)]
struct KeystoreFile {
    version: u8,
    address: Option<String>,
    #[serde(alias = "Crypto")]
    crypto: Option<Value>,
}

#[derive(Debug)]
pub struct KeystoreConnector {
    path: PathBuf,
    password: Secret<String>,
}

impl KeystoreConnector {
    pub fn from_file(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Checks the keystore layout and returns the plaintext address, if any.
fn keystore_address(contents: &str) -> Result<Option<WalletAddress>, WalletError> {
    let keystore: KeystoreFile = serde_json::from_str(contents)
        .map_err(|e| WalletError::Keystore(format!("Not a keystore file: {}", e)))?;

    if keystore.version != 3 {
        return Err(WalletError::Keystore(format!(
            "Unsupported keystore version {}",
            keystore.version
        )));
    }
    if keystore.crypto.is_none() {
        return Err(WalletError::Keystore("Keystore has no crypto section".to_string()));
    }

    let Some(raw) = keystore.address else {
        return Ok(None);
    };
    let prefixed = if raw.starts_with("0x") || raw.starts_with("0X") {
        raw
    } else {
        format!("0x{}", raw)
    };
    Ok(Some(WalletAddress::parse(&prefixed)?))
}

#[async_trait]
impl WalletConnector for KeystoreConnector {
    fn method(&self) -> ConnectionMethod {
        ConnectionMethod::Keystore
    }

    async fn connect(&self) -> Result<ConnectedWallet, WalletError> {
        if self.password.expose_secret().is_empty() {
            return Err(WalletError::MissingPassword);
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| WalletError::Keystore(format!("Failed to read the file: {}", e)))?;
        let declared = keystore_address(&contents)?;

        // scrypt/pbkdf2 key derivation blocks; run it off the async workers.
        let path = self.path.clone();
        let password = Secret::new(self.password.expose_secret().clone());
        let wallet = tokio::task::spawn_blocking(move || {
            LocalWallet::decrypt_keystore(&path, password.expose_secret())
        })
        .await
        .map_err(|e| WalletError::Keystore(format!("Decryption was interrupted: {}", e)))?
        .map_err(|e| WalletError::Keystore(format!("Could not decrypt keystore: {}", e)))?;

        let signer = LocalSigner::new(wallet);
        if let Some(declared) = declared {
            if declared != signer.address() {
                return Err(WalletError::Keystore(
                    "Keystore address does not match its key".to_string(),
                ));
            }
        }

        tracing::debug!(address = %signer.address(), "Keystore unlocked");
        Ok(ConnectedWallet::unlocked(signer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::core::rand::thread_rng;
    use ethers::signers::Signer;
    use std::path::Path;

    const PASSWORD: &str = "hunter2";

    /// Writes a freshly generated V3 keystore into `dir`.
    fn write_keystore(dir: &Path) -> (PathBuf, WalletAddress) {
        let (wallet, _) =
            LocalWallet::new_keystore(dir, &mut thread_rng(), PASSWORD, Some("wallet.json"))
                .unwrap();
        (dir.join("wallet.json"), wallet.address().into())
    }

    fn rewrite(path: &Path, edit: impl FnOnce(&mut Value)) {
        let mut json: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        edit(&mut json);
        std::fs::write(path, json.to_string()).unwrap();
    }

    #[tokio::test]
    async fn correct_password_unlocks_signer() {
        let dir = tempfile::tempdir().unwrap();
        let (path, address) = write_keystore(dir.path());

        let wallet = KeystoreConnector::from_file(path, PASSWORD).connect().await.unwrap();
        assert_eq!(wallet.address, address);
        assert_eq!(wallet.method, ConnectionMethod::Keystore);
        assert_eq!(wallet.signer.map(|s| s.address()), Some(address));
    }

    #[tokio::test]
    async fn wrong_password_is_keystore_error() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _) = write_keystore(dir.path());

        let result = KeystoreConnector::from_file(path, "not-the-password").connect().await;
        assert!(matches!(result, Err(WalletError::Keystore(msg)) if msg.contains("decrypt")));
    }

    #[tokio::test]
    async fn matching_declared_address_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let (path, address) = write_keystore(dir.path());
        rewrite(&path, |json| {
            json["address"] = Value::String(address.to_lower_hex()[2..].to_string());
        });

        let wallet = KeystoreConnector::from_file(path, PASSWORD).connect().await.unwrap();
        assert_eq!(wallet.address, address);
    }

    #[tokio::test]
    async fn declared_address_must_match_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _) = write_keystore(dir.path());
        rewrite(&path, |json| {
            json["address"] = Value::String("ab".repeat(20));
        });

        let result = KeystoreConnector::from_file(path, PASSWORD).connect().await;
        assert!(matches!(result, Err(WalletError::Keystore(msg)) if msg.contains("does not match")));
    }

    #[tokio::test]
    async fn missing_file_is_keystore_error() {
        let dir = tempfile::tempdir().unwrap();
        let connector = KeystoreConnector::from_file(dir.path().join("absent.json"), PASSWORD);
        assert!(matches!(connector.connect().await, Err(WalletError::Keystore(_))));
    }

    #[tokio::test]
    async fn empty_password_is_rejected_before_reading() {
        let connector = KeystoreConnector::from_file("/does/not/exist.json", "");
        assert_eq!(connector.connect().await, Err(WalletError::MissingPassword));
    }

    #[tokio::test]
    async fn rejects_wrong_version() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _) = write_keystore(dir.path());
        rewrite(&path, |json| json["version"] = Value::from(1));

        let result = KeystoreConnector::from_file(path, PASSWORD).connect().await;
        assert!(matches!(result, Err(WalletError::Keystore(msg)) if msg.contains("version")));
    }

    #[test]
    fn rejects_non_keystore_json() {
        assert!(matches!(
            keystore_address("{\"hello\": \"world\"}"),
            Err(WalletError::Keystore(_))
        ));
    }

    #[test]
    fn keystore_without_crypto_is_rejected() {
        assert!(matches!(
            keystore_address("{\"version\": 3}"),
            Err(WalletError::Keystore(msg)) if msg.contains("crypto")
        ));
    }

    #[test]
    fn invalid_declared_address_is_invalid_address() {
        let contents = r#"{"version": 3, "address": "xyz", "crypto": {}}"#;
        assert!(matches!(
            keystore_address(contents),
            Err(WalletError::InvalidAddress(_))
        ));
    }

    #[test]
    fn debug_does_not_leak_password() {
        let connector = KeystoreConnector::from_file("wallet.json", "super-secret-password");
        assert!(!format!("{:?}", connector).contains("super-secret-password"));
    }
}
