//! Wei amounts and ether conversions.
//!
//! Both native ether and the ticket token use 18 decimals, so a single
//! `Wei` type over ethers' `U256` covers prices, balances, deposits and
//! withdrawals.

use ethers::types::U256;
use ethers::utils::{format_ether, parse_ether};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Number of decimal places between wei and ether.
pub const DECIMALS: u32 = 18;

/// An amount denominated in wei.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wei(U256);

impl Wei {
    pub const ZERO: Wei = Wei(U256([0; 4]));

    /// Creates an amount from a raw wei value.
    pub fn from_wei(wei: impl Into<U256>) -> Self {
        Self(wei.into())
    }

    /// Creates an amount from a whole number of ether.
    pub fn from_whole_ether(ether: u64) -> Self {
        Self(U256::from(ether) * U256::exp10(DECIMALS as usize))
    }

    /// Parses a decimal ether string such as `"0.01"` or `"2"`.
    pub fn parse_ether(raw: &str) -> Result<Self, ValidationError> {
        const FIELD: &str = "amount";

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(FIELD));
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(ValidationError::invalid_format(FIELD, "no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                FIELD,
                "expected a non-negative decimal number",
            ));
        }
        if fraction.len() > DECIMALS as usize {
            return Err(ValidationError::invalid_format(
                FIELD,
                format!("more than {} decimal places", DECIMALS),
            ));
        }

        let whole = if whole.is_empty() { "0" } else { whole };
        let normalized = if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, fraction)
        };

        parse_ether(normalized)
            .map(Self)
            .map_err(|_| ValidationError::invalid_format(FIELD, "amount too large"))
    }

    /// Raw wei value.
    pub fn as_wei(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_mul(self, factor: u64) -> Option<Self> {
        self.0.checked_mul(U256::from(factor)).map(Self)
    }

    pub fn checked_add(self, other: Wei) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Number of whole 18-decimal units, dropping any fraction.
    pub fn whole_units(&self) -> U256 {
        self.0 / U256::exp10(DECIMALS as usize)
    }

    /// Decimal ether representation without trailing zeros.
    pub fn to_ether_string(&self) -> String {
        let formatted = format_ether(self.0);
        if !formatted.contains('.') {
            return formatted;
        }
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

impl From<U256> for Wei {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<Wei> for U256 {
    fn from(value: Wei) -> Self {
        value.0
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.to_ether_string())
    }
}
