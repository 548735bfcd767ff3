//! Wallet connector adapters.
//!
//! - `ExtensionWalletConnector` - EIP-1193 `eth_requestAccounts`
//! - `KeystoreConnector` - V3 keystore JSON plus password
//! - `AddressEntryConnector` - typed address, lookup only
//! - `MockWalletConnector` - preset results for tests

mod address_entry;
mod extension;
mod keystore;
mod mock;

pub use address_entry::AddressEntryConnector;
pub use extension::ExtensionWalletConnector;
pub use keystore::KeystoreConnector;
pub use mock::MockWalletConnector;
