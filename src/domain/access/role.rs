//! Wallet roles and role sets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::WalletAddress;

/// Access tier associated with a wallet address.
///
/// Exactly one role applies to an address at a time. `Customer` is the
/// fallback for every valid address without a special designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Venue,
    Doorman,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Venue, Role::Doorman, Role::Customer];

    /// Lower-case identifier, as used in route paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Venue => "venue",
            Role::Doorman => "doorman",
            Role::Customer => "customer",
        }
    }

    /// Venue and doorman wallets are configured on the contract itself.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Venue | Role::Doorman)
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Venue => "Venue",
            Role::Doorman => "Doorman",
            Role::Customer => "Customer",
        };
        write!(f, "{}", s)
    }
}

/// A set of roles, used as the requirement of a guarded route or action.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    /// A set containing a single role.
    pub const fn only(role: Role) -> Self {
        Self(role.bit())
    }

    /// A set containing every role.
    pub const fn any() -> Self {
        Self(Role::Venue.bit() | Role::Doorman.bit() | Role::Customer.bit())
    }

    /// Returns this set with `role` added.
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        Self::only(role)
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, RoleSet::with)
    }
}

/// The privileged addresses configured on the ticket contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment {
    pub venue: WalletAddress,
    pub doorman: WalletAddress,
}

impl RoleAssignment {
    pub fn new(venue: WalletAddress, doorman: WalletAddress) -> Self {
        Self { venue, doorman }
    }

    /// Venue takes precedence if the contract ever names the same address twice.
    pub fn role_of(&self, address: &WalletAddress) -> Role {
        if *address == self.venue {
            Role::Venue
        } else if *address == self.doorman {
            Role::Doorman
        } else {
            Role::Customer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> WalletAddress {
        WalletAddress::from_bytes([0x11; 20])
    }

    fn doorman() -> WalletAddress {
        WalletAddress::from_bytes([0x22; 20])
    }

    #[test]
    fn role_display_and_identifier() {
        assert_eq!(Role::Venue.to_string(), "Venue");
        assert_eq!(Role::Doorman.as_str(), "doorman");
        assert_eq!(Role::Customer.as_str(), "customer");
    }

    #[test]
    fn privileged_roles() {
        assert!(Role::Venue.is_privileged());
        assert!(Role::Doorman.is_privileged());
        assert!(!Role::Customer.is_privileged());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Doorman).unwrap(), "\"doorman\"");
    }

    #[test]
    fn only_contains_single_role() {
        let set = RoleSet::only(Role::Customer);
        assert!(set.contains(Role::Customer));
        assert!(!set.contains(Role::Venue));
        assert!(!set.contains(Role::Doorman));
    }

    #[test]
    fn set_from_array_and_slice() {
        let from_array = RoleSet::from([Role::Venue, Role::Doorman]);
        let slice: &[Role] = &[Role::Doorman, Role::Venue];
        assert_eq!(from_array, RoleSet::from(slice));
        assert!(!from_array.contains(Role::Customer));
    }

    #[test]
    fn any_contains_all_roles() {
        let set = RoleSet::any();
        assert!(Role::ALL.iter().all(|role| set.contains(*role)));
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn empty_set_contains_nothing() {
        assert!(RoleSet::EMPTY.is_empty());
        assert!(RoleSet::default().is_empty());
        assert!(!RoleSet::EMPTY.contains(Role::Customer));
    }

    #[test]
    fn debug_lists_members() {
        let set = RoleSet::only(Role::Venue).with(Role::Customer);
        assert_eq!(format!("{:?}", set), "{Venue, Customer}");
    }

    #[test]
    fn assignment_matches_venue_and_doorman() {
        let assignment = RoleAssignment::new(venue(), doorman());
        assert_eq!(assignment.role_of(&venue()), Role::Venue);
        assert_eq!(assignment.role_of(&doorman()), Role::Doorman);
        assert_eq!(
            assignment.role_of(&WalletAddress::from_bytes([0x33; 20])),
            Role::Customer
        );
    }

    #[test]
    fn assignment_prefers_venue_when_addresses_coincide() {
        let assignment = RoleAssignment::new(venue(), venue());
        assert_eq!(assignment.role_of(&venue()), Role::Venue);
    }
}
