//! Unit tests for the revocation registry

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::services::token::RevocationRegistry;

#[test]
fn unknown_id_is_not_revoked() {
    let registry = RevocationRegistry::new();
    assert!(!registry.is_revoked("never-inserted"));
}

#[test]
fn revoked_id_reports_revoked_until_expiry() {
    let registry = RevocationRegistry::new();
    let expires_at = Utc::now() + Duration::minutes(5);

    assert!(registry.revoke("jti-1", expires_at));
    assert!(registry.is_revoked("jti-1"));
}

#[test]
fn revoke_is_idempotent() {
    let registry = RevocationRegistry::new();
    let expires_at = Utc::now() + Duration::minutes(5);

    assert!(registry.revoke("jti-1", expires_at));
    assert!(!registry.revoke("jti-1", expires_at));

    assert!(registry.is_revoked("jti-1"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn expired_entry_counts_as_absent_and_is_lazily_evicted() {
    let registry = RevocationRegistry::new();
    registry.revoke("jti-old", Utc::now() - Duration::seconds(1));
    assert_eq!(registry.len(), 1);

    assert!(!registry.is_revoked("jti-old"));
    // The lookup itself removed the stale entry.
    assert_eq!(registry.len(), 0);
}

#[test]
fn sweep_removes_only_expired_entries() {
    let registry = RevocationRegistry::new();
    let now = Utc::now();
    registry.revoke("live-1", now + Duration::hours(1));
    registry.revoke("dead-1", now - Duration::seconds(1));
    registry.revoke("dead-2", now - Duration::minutes(10));

    assert_eq!(registry.sweep(), 2);
    assert_eq!(registry.len(), 1);
    assert!(registry.is_revoked("live-1"));
}

#[test]
fn sweep_clears_entries_never_looked_up_again() {
    // An id revoked and never presented again must still be dropped once
    // its expiry passes, or it would linger until restart.
    let registry = RevocationRegistry::new();
    registry.revoke("forgotten", Utc::now() - Duration::seconds(1));

    assert_eq!(registry.sweep(), 1);
    assert!(registry.is_empty());
}

#[test]
fn sweep_on_empty_registry_removes_nothing() {
    let registry = RevocationRegistry::new();
    assert_eq!(registry.sweep(), 0);
}

#[test]
fn exactly_one_concurrent_revoke_claims_the_id() {
    let registry = Arc::new(RevocationRegistry::new());
    let expires_at = Utc::now() + Duration::minutes(5);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.revoke("contested", expires_at))
        })
        .collect();

    let claimed: usize = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|inserted| *inserted)
        .count();

    assert_eq!(claimed, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_lookups_and_revocations_do_not_deadlock() {
    let registry = Arc::new(RevocationRegistry::new());
    let now = Utc::now();

    // Seed a mix of live and already-expired entries.
    for i in 0..50 {
        let expiry = if i % 2 == 0 {
            now + Duration::minutes(5)
        } else {
            now - Duration::seconds(1)
        };
        registry.revoke(&format!("jti-{i}"), expiry);
    }

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..50 {
                    registry.is_revoked(&format!("jti-{i}"));
                    if t == 0 {
                        registry.sweep();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Every expired entry is gone; every live one survived.
    assert_eq!(registry.len(), 25);
}
