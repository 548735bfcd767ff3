//! Optional role hash configuration

use serde::Deserialize;

use super::error::ValidationError;

/// A SHA-256 digest of a role address.
pub type RoleDigest = [u8; 32];

/// SHA-256 digests of the venue and doorman addresses.
///
/// Only used to guess a role before the contract answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleHintConfig {
    pub venue_hash: Option<String>,
    pub doorman_hash: Option<String>,
}

impl RoleHintConfig {
    pub fn is_configured(&self) -> bool {
        self.venue_hash.is_some() && self.doorman_hash.is_some()
    }

    /// Decoded venue and doorman digests, or `None` when neither is set.
    pub fn digests(&self) -> Result<Option<(RoleDigest, RoleDigest)>, ValidationError> {
        match (&self.venue_hash, &self.doorman_hash) {
            (None, None) => Ok(None),
            (Some(venue), Some(doorman)) => Ok(Some((
                parse_digest("roles.venue_hash", venue)?,
                parse_digest("roles.doorman_hash", doorman)?,
            ))),
            _ => Err(ValidationError::IncompleteRoleHashes),
        }
    }

    /// Validate role hash configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.digests().map(|_| ())
    }
}

/// Decodes 64 hex digits, with or without a `0x` prefix.
pub fn parse_digest(field: &'static str, raw: &str) -> Result<RoleDigest, ValidationError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let mut digest = [0u8; 32];
    hex::decode_to_slice(digits, &mut digest)
        .map_err(|_| ValidationError::InvalidRoleHash { field })?;
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_is_valid() {
        let config = RoleHintConfig::default();
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn both_hashes_must_be_set() {
        let config = RoleHintConfig {
            venue_hash: None,
            doorman_hash: Some("ab".repeat(32)),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::IncompleteRoleHashes)
        ));
    }

    #[test]
    fn hashes_must_be_sha256_hex() {
        let config = RoleHintConfig {
            venue_hash: Some("ab".repeat(32)),
            doorman_hash: Some("not-a-hash".to_string()),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRoleHash {
                field: "roles.doorman_hash"
            })
        ));

        let config = RoleHintConfig {
            venue_hash: Some(format!("0x{}", "AB".repeat(32))),
            doorman_hash: Some("01".repeat(32)),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn digests_are_decoded_once_validated() {
        let config = RoleHintConfig {
            venue_hash: Some(format!("0x{}", "ab".repeat(32))),
            doorman_hash: Some("01".repeat(32)),
        };
        assert_eq!(config.digests().unwrap(), Some(([0xab; 32], [0x01; 32])));
        assert_eq!(RoleHintConfig::default().digests().unwrap(), None);
    }

    #[test]
    fn short_digest_is_rejected() {
        assert!(matches!(
            parse_digest("roles.venue_hash", "abcd"),
            Err(ValidationError::InvalidRoleHash { field: "roles.venue_hash" })
        ));
    }
}
