//! Wallet address value object.
//!
//! Wraps an ethers [`Address`], so two addresses that differ only in letter
//! casing compare equal. Display uses the EIP-55 checksummed form;
//! [`WalletAddress::to_lower_hex`] gives the normalized form used for
//! hashing and logging.

use ethers::types::{Address, H160};
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const FIELD: &str = "address";

/// A syntactically valid on-chain account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(Address);

impl WalletAddress {
    /// Parses an address from user or RPC input.
    ///
    /// Surrounding whitespace is ignored and letter casing is not
    /// significant: `0x` followed by 40 hex digits in any casing is accepted.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits = hex_digits(raw)?;
        let address = Address::from_str(digits)
            .map_err(|_| ValidationError::invalid_format(FIELD, "contains non-hex characters"))?;
        Ok(Self(address))
    }

    /// Parses an address whose mixed-case form must carry a valid EIP-55
    /// checksum. All-lower and all-upper input is accepted unchecked.
    pub fn parse_checksummed(raw: &str) -> Result<Self, ValidationError> {
        let address = Self::parse(raw)?;
        let digits = hex_digits(raw)?;
        if is_mixed_case(digits) && address.to_checksum()[2..] != *digits {
            return Err(ValidationError::invalid_format(FIELD, "checksum mismatch"));
        }
        Ok(address)
    }

    /// Creates an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(H160(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_fixed_bytes()
    }

    /// The underlying ethers address.
    pub fn as_address(&self) -> Address {
        self.0
    }

    /// Returns true for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Normalized `0x`-prefixed lower-case form.
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0.as_bytes()))
    }

    /// EIP-55 checksummed form.
    pub fn to_checksum(&self) -> String {
        to_checksum(&self.0, None)
    }
}

/// Trims `raw` and returns its 40 hex digits without the `0x` prefix.
fn hex_digits(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(FIELD));
    }

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| ValidationError::invalid_format(FIELD, "missing 0x prefix"))?;

    if digits.len() != 40 {
        return Err(ValidationError::invalid_format(
            FIELD,
            format!("expected 40 hex digits, got {}", digits.len()),
        ));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::invalid_format(FIELD, "contains non-hex characters"));
    }
    Ok(digits)
}

fn is_mixed_case(digits: &str) -> bool {
    digits.chars().any(|c| c.is_ascii_lowercase()) && digits.chars().any(|c| c.is_ascii_uppercase())
}

impl From<Address> for WalletAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<WalletAddress> for Address {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.to_lower_hex())
    }
}

impl FromStr for WalletAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.to_checksum()
    }
}
