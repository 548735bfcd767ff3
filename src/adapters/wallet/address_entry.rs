//! Typed-in address. Good for looking a wallet up, useless for signing.

use async_trait::async_trait;

use crate::domain::access::ConnectionMethod;
use crate::domain::foundation::WalletAddress;
use crate::ports::{ConnectedWallet, WalletConnector, WalletError};

#[derive(Debug, Clone)]
pub struct AddressEntryConnector {
    input: String,
}

impl AddressEntryConnector {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

#[async_trait]
impl WalletConnector for AddressEntryConnector {
    fn method(&self) -> ConnectionMethod {
        ConnectionMethod::AddressEntry
    }

    async fn connect(&self) -> Result<ConnectedWallet, WalletError> {
        let address = WalletAddress::parse(&self.input)?;
        Ok(ConnectedWallet::new(address, ConnectionMethod::AddressEntry))
    }
}
