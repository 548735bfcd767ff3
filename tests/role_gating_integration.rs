//! Integration tests for role resolution and gating.
//!
//! Drives the public API end to end with the in-memory contract and wallet:
//! 1. A wallet connects and its role is read from the contract
//! 2. The session lands on the role's wallet page
//! 3. Pages and actions outside the role redirect to the identity page

use std::sync::Arc;

use proptest::prelude::*;

use ticket_gate::adapters::{AddressEntryConnector, MockTicketContract, MockWalletConnector};
use ticket_gate::application::{
    ConnectOutcome, ConnectWalletHandler, RoleHintCache, RoleResolver, SessionScope,
};
use ticket_gate::domain::access::{
    authorize, authorize_route, AccessError, Authorization, Role, Route,
};
use ticket_gate::domain::contract::ContractError;
use ticket_gate::domain::foundation::WalletAddress;

// =============================================================================
// Test Infrastructure
// =============================================================================

const VENUE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
const DOORMAN: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
const CUSTOMER: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";

fn address(raw: &str) -> WalletAddress {
    WalletAddress::parse(raw).unwrap()
}

fn contract() -> Arc<MockTicketContract> {
    Arc::new(MockTicketContract::new(address(VENUE), address(DOORMAN)))
}

struct App {
    contract: Arc<MockTicketContract>,
    resolver: Arc<RoleResolver>,
    scope: Arc<SessionScope>,
    connect: ConnectWalletHandler,
}

fn app() -> App {
    let contract = contract();
    let resolver = Arc::new(RoleResolver::new(contract.clone()));
    let scope = Arc::new(SessionScope::new());
    let connect = ConnectWalletHandler::new(resolver.clone(), scope.clone());
    App {
        contract,
        resolver,
        scope,
        connect,
    }
}

// =============================================================================
// End-to-end gating
// =============================================================================

#[tokio::test]
async fn venue_is_redirected_away_from_buy_ticket() {
    let app = app();

    let outcome = app
        .connect
        .handle(&AddressEntryConnector::new(VENUE))
        .await
        .unwrap();
    let ConnectOutcome::Established { session, landing } = outcome else {
        panic!("expected an established session");
    };
    assert_eq!(session.role(), Role::Venue);
    assert_eq!(landing, Route::VenueWallet);

    let current = app.scope.current();
    match authorize_route(current.as_ref(), Route::BuyTicket) {
        Authorization::Redirect(redirect) => {
            assert_eq!(redirect.target.path(), "/view-wallet-auth");
            assert!(!redirect.message.to_lowercase().contains("venue"));
        }
        Authorization::Allow => panic!("venue must not reach the buy-ticket page"),
    }
}

#[tokio::test]
async fn each_role_reaches_only_its_pages() {
    let cases = [
        (DOORMAN, Route::DoormanWallet),
        (CUSTOMER, Route::CustomerWallet),
        (VENUE, Route::VenueWallet),
    ];

    for (raw, own_page) in cases {
        let app = app();
        app.connect
            .handle(&MockWalletConnector::signing(address(raw)))
            .await
            .unwrap();
        let session = app.scope.current();

        for route in Route::ALL {
            let result = authorize_route(session.as_ref(), route);
            let expected = route == own_page
                || route.required_roles().is_none()
                || (own_page == Route::CustomerWallet
                    && matches!(route, Route::BuyTicket | Route::Refund | Route::Watch));
            assert_eq!(result.is_allowed(), expected, "{raw} on {}", route.path());
        }
    }
}

#[tokio::test]
async fn no_session_is_redirected_everywhere_gated() {
    for route in Route::ALL {
        let result = authorize_route(None, route);
        assert_eq!(result.is_redirect(), route.required_roles().is_some());
    }
    assert!(authorize(None, Role::Customer).is_redirect());
}

// =============================================================================
// Resolution
// =============================================================================

#[tokio::test]
async fn successive_resolutions_make_one_network_round() {
    let app = app();
    assert_eq!(app.resolver.resolve_role(CUSTOMER).await.unwrap(), Role::Customer);
    assert_eq!(app.resolver.resolve_role(CUSTOMER).await.unwrap(), Role::Customer);
    assert_eq!(app.contract.role_lookups(), 1);
}

#[tokio::test]
async fn invalid_address_never_reaches_the_contract() {
    let app = app();
    for raw in [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe",
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeDD",
        "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeG",
    ] {
        let err = app.resolver.resolve_role(raw).await;
        assert!(matches!(err, Err(AccessError::InvalidAddress(_))), "{raw}");
    }
    assert_eq!(app.contract.reads(), 0);
}

#[tokio::test]
async fn broken_checksum_casing_still_resolves() {
    let app = app();
    // Last letter flipped, so the EIP-55 checksum no longer holds.
    let miscased = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD";
    assert!(WalletAddress::parse_checksummed(miscased).is_err());
    assert_eq!(app.resolver.resolve_role(miscased).await.unwrap(), Role::Venue);
}

#[tokio::test]
async fn lookup_failure_is_reported_not_downgraded() {
    let contract = Arc::new(
        MockTicketContract::new(address(VENUE), address(DOORMAN))
            .with_error(ContractError::network("connection reset")),
    );
    let resolver = RoleResolver::new(contract.clone());

    let err = resolver.resolve_role(VENUE).await.unwrap_err();
    assert!(matches!(err, AccessError::RoleLookup { .. }));
    assert!(err.user_message().contains("try again"));

    contract.clear_error();
    assert_eq!(resolver.resolve_role(VENUE).await.unwrap(), Role::Venue);
}

#[tokio::test]
async fn hint_cache_is_reconciled_with_contract() {
    let contract = contract();
    let hints = RoleHintCache::new(
        RoleHintCache::hash_address(&address(VENUE)),
        RoleHintCache::hash_address(&address(DOORMAN)),
    );
    let resolver = RoleResolver::new(contract.clone()).with_hints(hints);

    assert_eq!(resolver.peek_role(&address(DOORMAN)), Some(Role::Doorman));
    resolver.resolve(&address(CUSTOMER)).await.unwrap();
    assert!(resolver.hints().unwrap().is_trusted());

    contract.set_venue(address(CUSTOMER));
    resolver.forget(&address(CUSTOMER));
    assert_eq!(resolver.resolve(&address(CUSTOMER)).await.unwrap(), Role::Venue);
    assert!(!resolver.hints().unwrap().is_trusted());
    assert_eq!(resolver.peek_role(&address(VENUE)), None);
}

proptest! {
    #[test]
    fn role_ignores_address_casing(mask in proptest::collection::vec(any::<bool>(), 40)) {
        let cased = |raw: &str| -> String {
            let digits: String = raw[2..]
                .chars()
                .zip(&mask)
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();
            format!("0x{}", digits)
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let resolver = RoleResolver::new(contract());

        for (raw, role) in [(VENUE, Role::Venue), (DOORMAN, Role::Doorman), (CUSTOMER, Role::Customer)] {
            let input = cased(raw);
            let resolved = runtime.block_on(resolver.resolve_role(&input));
            prop_assert_eq!(resolved.unwrap(), role, "{}", input);
        }
    }

    #[test]
    fn unknown_addresses_are_customers(bytes in any::<[u8; 20]>()) {
        let candidate = WalletAddress::from_bytes(bytes);
        prop_assume!(candidate != address(VENUE) && candidate != address(DOORMAN));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let resolver = RoleResolver::new(contract());

        let role = runtime.block_on(resolver.resolve_role(&candidate.to_lower_hex())).unwrap();
        prop_assert_eq!(role, Role::Customer);
    }
}
