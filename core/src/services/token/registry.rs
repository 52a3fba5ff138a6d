//! In-process registry of revoked token identifiers.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe set of revoked token identifiers, each with the expiry of
/// the token it revokes.
///
/// Because an entry's expiry always equals the revoked token's own expiry,
/// the registry never holds more than one entry per not-yet-expired token
/// that was explicitly revoked: entries die with their tokens, either
/// lazily on lookup or through [`RevocationRegistry::sweep`].
///
/// One instance exists per process, constructed by the composition root and
/// handed to every consumer; nothing reads or writes the underlying map
/// directly.
#[derive(Debug, Default)]
pub struct RevocationRegistry {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a token identifier as revoked until `expires_at`.
    ///
    /// Idempotent: revoking an already-revoked identifier changes nothing.
    /// Returns `true` when the identifier was newly inserted and `false`
    /// when an unexpired entry was already present. Rotation uses that
    /// return value as its claim step, so two racing rotations of the same
    /// refresh token cannot both observe a fresh insert.
    pub fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> bool {
        let now = Utc::now();
        let mut entries = write_lock(&self.entries);

        match entries.get(jti) {
            Some(existing) if *existing > now => false,
            _ => {
                entries.insert(jti.to_string(), expires_at);
                true
            }
        }
    }

    /// Whether a token identifier is currently revoked.
    ///
    /// An entry whose expiry has passed counts as absent and is deleted as
    /// a side effect. The eviction releases the read guard before taking
    /// the write guard rather than upgrading atomically; a concurrent
    /// reader may briefly still see the stale entry, which is harmless
    /// because an expired token is rejected by the expiry check before the
    /// revocation check is ever consulted.
    pub fn is_revoked(&self, jti: &str) -> bool {
        let now = Utc::now();

        {
            let entries = read_lock(&self.entries);
            match entries.get(jti) {
                None => return false,
                Some(expires_at) if *expires_at > now => return true,
                Some(_) => {} // expired entry, evict below
            }
        }

        let mut entries = write_lock(&self.entries);
        if let Some(expires_at) = entries.get(jti) {
            // Identifiers are never reused, so the entry can only still be
            // the expired one we just saw.
            if *expires_at <= now {
                entries.remove(jti);
            }
        }
        false
    }

    /// Removes every entry whose expiry has passed and returns how many
    /// were dropped. Backstop for identifiers that are revoked but never
    /// looked up again before their natural expiry.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut entries = write_lock(&self.entries);

        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    /// Number of entries currently stored, expired or not
    pub fn len(&self) -> usize {
        read_lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Map operations cannot leave the registry in a torn state, so a poisoned
// lock is recovered rather than propagated.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
