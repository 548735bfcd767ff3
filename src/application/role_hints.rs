//! Advisory role hints from configured address hashes.
//!
//! The deployment can ship SHA-256 digests of the venue and doorman
//! addresses, which lets the UI guess a role before the contract has
//! answered. The guess is never used for access decisions. Every canonical
//! lookup reconciles the digests against the on-chain addresses, and a single
//! mismatch switches the hints off for the lifetime of the cache.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};
use subtle::ConstantTimeEq;

use crate::config::{parse_digest, RoleDigest, RoleHintConfig, ValidationError};
use crate::domain::access::{Role, RoleAssignment};
use crate::domain::foundation::WalletAddress;

#[derive(Debug)]
pub struct RoleHintCache {
    venue: RoleDigest,
    doorman: RoleDigest,
    trusted: AtomicBool,
}

impl RoleHintCache {
    pub fn new(venue: RoleDigest, doorman: RoleDigest) -> Self {
        Self {
            venue,
            doorman,
            trusted: AtomicBool::new(true),
        }
    }

    /// Builds the cache from two hex-encoded SHA-256 digests.
    pub fn from_hex(venue_hash: &str, doorman_hash: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(
            parse_digest("roles.venue_hash", venue_hash)?,
            parse_digest("roles.doorman_hash", doorman_hash)?,
        ))
    }

    /// `None` when no hashes are configured.
    pub fn from_config(config: &RoleHintConfig) -> Result<Option<Self>, ValidationError> {
        Ok(config
            .digests()?
            .map(|(venue, doorman)| Self::new(venue, doorman)))
    }

    /// SHA-256 of the lower-case `0x`-prefixed address.
    pub fn hash_address(address: &WalletAddress) -> RoleDigest {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(address.to_lower_hex().as_bytes()));
        digest
    }

    /// Guessed role, or `None` once the hints have been invalidated.
    pub fn hint(&self, address: &WalletAddress) -> Option<Role> {
        if !self.is_trusted() {
            return None;
        }

        let digest = Self::hash_address(address);
        if bool::from(digest[..].ct_eq(&self.venue[..])) {
            Some(Role::Venue)
        } else if bool::from(digest[..].ct_eq(&self.doorman[..])) {
            Some(Role::Doorman)
        } else {
            Some(Role::Customer)
        }
    }

    /// Checks the digests against the on-chain assignment and invalidates the
    /// cache on any mismatch. Returns whether the hints are still trusted.
    pub fn reconcile(&self, assignment: &RoleAssignment) -> bool {
        let venue_ok = Self::hash_address(&assignment.venue)[..].ct_eq(&self.venue[..]);
        let doorman_ok = Self::hash_address(&assignment.doorman)[..].ct_eq(&self.doorman[..]);

        if bool::from(venue_ok & doorman_ok) {
            return self.is_trusted();
        }

        if self.trusted.swap(false, Ordering::SeqCst) {
            tracing::warn!(
                venue = %assignment.venue,
                doorman = %assignment.doorman,
                "Configured role hashes do not match the contract; disabling role hints"
            );
        }
        false
    }

    pub fn invalidate(&self) {
        self.trusted.store(false, Ordering::SeqCst);
    }

    pub fn is_trusted(&self) -> bool {
        self.trusted.load(Ordering::SeqCst)
    }
}
