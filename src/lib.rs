//! Ticket Gate - wallet roles and access gating for a ticketing dApp
//!
//! Resolves a wallet address to its role (venue, doorman or customer) by
//! asking the deployed ticket contract, gates pages and actions by role, and
//! submits the contract's write calls on behalf of authorized sessions.
//!
//! The crate is organised as ports and adapters:
//!
//! - [`domain`] - addresses, amounts, roles, the guard and the contract ABI
//! - [`ports`] - contract and wallet connector traits
//! - [`adapters`] - ethers JSON-RPC provider, wallet connectors and in-memory test doubles
//! - [`application`] - role resolver, session scope and handlers
//! - [`config`] - environment-based configuration and logging setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
