//! Adapters - implementations of the port interfaces.
//!
//! - `rpc` - ethers JSON-RPC provider and the on-chain ticket contract
//! - `wallet` - wallet connectors (extension, keystore, address entry)
//! - `contract` - in-memory ticket contract for tests

pub mod contract;
pub mod rpc;
pub mod wallet;

pub use contract::MockTicketContract;
pub use rpc::{RpcConfig, RpcProvider, RpcTicketContract};
pub use wallet::{
    AddressEntryConnector, ExtensionWalletConnector, KeystoreConnector, MockWalletConnector,
};
