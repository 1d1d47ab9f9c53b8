//! Integration test: registry write paths across crates.
//!
//! Covers the authorization gate, both mint paths, termination, and the
//! serialization of concurrent writes.

use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};

use attest_core::{CredentialCategory, EmploymentType, RegistryError, TokenId};
use attest_integration_tests::addr;
use attest_registry::Registry;

/// Registry with owner 0x..01 and 0x..02 authorized as "Acme Corp".
fn setup() -> Arc<Registry> {
    let registry = Arc::new(Registry::new(addr(1)));
    registry
        .authorize_company(&addr(1), &addr(2), "Acme Corp")
        .expect("owner can authorize");
    registry
}

// =========================================================================
// Authorization gate
// =========================================================================

#[test]
fn test_only_owner_authorizes() {
    let registry = Registry::new(addr(1));

    let result = registry.authorize_company(&addr(2), &addr(2), "Self-Serve Corp");
    assert!(matches!(result, Err(RegistryError::Unauthorized(_))));
    assert!(!registry.is_authorized(&addr(2)));

    registry
        .authorize_company(&addr(1), &addr(2), "Acme Corp")
        .unwrap();
    assert!(registry.is_authorized(&addr(2)));
    assert_eq!(registry.profile(&addr(2)).company_name, "Acme Corp");
}

#[test]
fn test_unknown_addresses_read_as_empty() {
    let registry = Registry::new(addr(1));
    assert!(!registry.is_authorized(&addr(9)));
    assert!(registry.profile(&addr(9)).company_name.is_empty());
    assert!(registry.credentials_by_owner(&addr(9)).is_empty());
    assert!(registry.employment_history(&addr(9)).is_empty());
}

// =========================================================================
// Mint paths
// =========================================================================

#[test]
fn test_generic_and_employment_mints_share_one_counter() {
    let registry = setup();

    let generic = registry
        .mint_credential(
            &addr(1),
            &addr(3),
            CredentialCategory::Generic,
            95,
            "ipfs://education.json",
        )
        .unwrap();
    let employment = registry
        .mint_employment(
            &addr(2),
            &addr(3),
            "Acme Corp",
            "Senior AI Engineer",
            EmploymentType::FullTime,
            "ipfs://employment.json",
        )
        .unwrap();

    assert_eq!(generic, TokenId(1));
    assert_eq!(employment, TokenId(2));
    // Both land in the same ownership index, in mint order.
    assert_eq!(
        registry.credentials_by_owner(&addr(3)),
        vec![generic, employment]
    );
    assert_eq!(
        registry.token_uri(generic).unwrap(),
        "ipfs://education.json"
    );
}

#[test]
fn test_failed_employment_mint_leaves_no_trace() {
    let registry = setup();

    let result = registry.mint_employment(
        &addr(7),
        &addr(3),
        "Phantom Corp",
        "Engineer",
        EmploymentType::FullTime,
        "ipfs://employment.json",
    );
    assert!(matches!(result, Err(RegistryError::Unauthorized(_))));

    // Neither a token nor a record exists, and the counter did not move.
    assert!(registry.credentials_by_owner(&addr(3)).is_empty());
    assert!(registry.employment_history(&addr(3)).is_empty());
    let next = registry
        .mint_credential(&addr(1), &addr(3), CredentialCategory::Generic, 90, "u")
        .unwrap();
    assert_eq!(next, TokenId(1));
}

#[test]
fn test_record_links_back_to_employment_token() {
    let registry = setup();
    let id = registry
        .mint_employment(
            &addr(2),
            &addr(3),
            "Acme Corp",
            "Engineer",
            EmploymentType::Contract,
            "ipfs://employment.json",
        )
        .unwrap();

    let record = &registry.employment_history(&addr(3))[0];
    assert_eq!(record.token_id, id);

    let token = registry.token(id).unwrap();
    assert_eq!(token.category, CredentialCategory::Employment);
    assert_eq!(token.owner, addr(3));
    assert_eq!(token.issuer, addr(2));
}

// =========================================================================
// Termination
// =========================================================================

#[test]
fn test_termination_lifecycle() {
    let registry = setup();
    let id = registry
        .mint_employment(
            &addr(2),
            &addr(3),
            "Acme Corp",
            "Engineer",
            EmploymentType::FullTime,
            "ipfs://employment.json",
        )
        .unwrap();
    let end = Utc::now() + Duration::days(180);

    registry.end_employment(&addr(2), id, end).unwrap();
    let record = &registry.employment_history(&addr(3))[0];
    assert_eq!(record.end_date, Some(end));
    assert!(!record.is_active());

    // No re-activation and no second termination.
    let again = registry.end_employment(&addr(2), id, end + Duration::days(1));
    assert!(matches!(again, Err(RegistryError::InvalidState(_))));
}

#[test]
fn test_termination_requires_issuing_company() {
    let registry = setup();
    registry
        .authorize_company(&addr(1), &addr(4), "Globex")
        .unwrap();
    let id = registry
        .mint_employment(
            &addr(2),
            &addr(3),
            "Acme Corp",
            "Engineer",
            EmploymentType::FullTime,
            "ipfs://employment.json",
        )
        .unwrap();

    // A different authorized company cannot end it; neither can the owner.
    for caller in [addr(4), addr(1)] {
        let result = registry.end_employment(&caller, id, Utc::now());
        assert!(matches!(result, Err(RegistryError::Unauthorized(_))));
    }
    assert!(registry.employment_history(&addr(3))[0].is_active());
}

// =========================================================================
// Concurrency: writes are serialized with no lost updates
// =========================================================================

#[test]
fn test_concurrent_mints_all_commit_with_distinct_ids() {
    let registry = setup();
    let threads = 8;
    let mints_per_thread = 25;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut ids = Vec::new();
                for _ in 0..mints_per_thread {
                    let id = registry
                        .mint_employment(
                            &addr(2),
                            &addr(3),
                            "Acme Corp",
                            "Engineer",
                            EmploymentType::PartTime,
                            "ipfs://employment.json",
                        )
                        .expect("concurrent mint should succeed");
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let mut all_ids: Vec<TokenId> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("mint thread should not panic"))
        .collect();

    // Every mint committed, every id is unique.
    assert_eq!(all_ids.len(), threads * mints_per_thread);
    all_ids.sort();
    all_ids.dedup();
    assert_eq!(all_ids.len(), threads * mints_per_thread);

    // History and ownership index agree, record-per-token.
    let history = registry.employment_history(&addr(3));
    assert_eq!(history.len(), threads * mints_per_thread);
    assert_eq!(
        registry.credentials_by_owner(&addr(3)).len(),
        threads * mints_per_thread
    );

    // Per-thread relative order is preserved in the shared history.
    let order: Vec<TokenId> = history.iter().map(|r| r.token_id).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(
        registry.credentials_by_owner(&addr(3)),
        order,
        "ownership index and history must commit in the same order"
    );
    assert_eq!(sorted.first(), order.iter().min());
}
