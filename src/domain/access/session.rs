//! Wallet session - a connected address together with its resolved role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;
use crate::domain::contract::LocalSigner;
use crate::domain::foundation::{SessionId, WalletAddress};

/// How the wallet address was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMethod {
    /// Account access granted by a browser extension.
    BrowserExtension,
    /// Encrypted keystore file unlocked with a password.
    Keystore,
    /// Address typed in by the user; lookup only.
    AddressEntry,
}

impl ConnectionMethod {
    /// Whether this kind of connection can sign transactions at all.
    pub fn can_sign(&self) -> bool {
        !matches!(self, ConnectionMethod::AddressEntry)
    }
}

/// In-memory, non-persisted association between a wallet and its role.
///
/// A session lives for one navigation context only. Anything that needs the
/// role after the user navigates away has to resolve it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    address: WalletAddress,
    role: Role,
    method: ConnectionMethod,
    established_at: DateTime<Utc>,
    #[serde(skip)]
    signer: Option<LocalSigner>,
}

impl Session {
    pub fn new(address: WalletAddress, role: Role, method: ConnectionMethod) -> Self {
        Self {
            id: SessionId::new(),
            address,
            role,
            method,
            established_at: Utc::now(),
            signer: None,
        }
    }

    /// Attaches the decrypted key of a keystore connection.
    pub fn with_signer(mut self, signer: Option<LocalSigner>) -> Self {
        self.signer = signer;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn method(&self) -> ConnectionMethod {
        self.method
    }

    pub fn established_at(&self) -> &DateTime<Utc> {
        &self.established_at
    }

    pub fn signer(&self) -> Option<&LocalSigner> {
        self.signer.as_ref()
    }

    /// Keystore sessions sign with their own key; extension sessions defer
    /// to the wallet behind the endpoint.
    pub fn can_sign(&self) -> bool {
        match self.method {
            ConnectionMethod::Keystore => self.signer.is_some(),
            method => method.can_sign(),
        }
    }
}
