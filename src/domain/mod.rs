//! Domain layer containing the access rules and contract vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (addresses, amounts, ids, errors)
//! - `access` - Roles, sessions and the route/action guard
//! - `contract` - Ticket contract ABI, transactions and call errors

pub mod access;
pub mod contract;
pub mod foundation;
