//! Token revocation registry.

use dashmap::DashSet;

/// Membership store for revoked token IDs.
///
/// Abstracted behind a trait so a persistent backing store (e.g. a KV store
/// with TTLs matching token expiry) can replace the in-memory set without
/// touching the auth flows.
pub trait RevocationStore: Send + Sync {
    /// Mark a jti as revoked. Idempotent.
    fn revoke(&self, jti: &str);

    /// Whether a jti has been revoked.
    fn is_revoked(&self, jti: &str) -> bool;
}

/// Process-lifetime revocation set.
///
/// Entries do not survive a restart: previously revoked tokens become valid
/// again until their natural expiry. Callers relying on logout for security
/// guarantees need a persistent `RevocationStore` instead.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    revoked: DashSet<String>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn revoke(&self, jti: &str) {
        self.revoked.insert(jti.to_string());
    }

    fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.contains(jti)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_jti_is_a_member() {
        let store = InMemoryRevocationStore::new();
        assert!(!store.is_revoked("abc"));
        store.revoke("abc");
        assert!(store.is_revoked("abc"));
    }

    #[test]
    fn revoking_twice_is_a_no_op() {
        let store = InMemoryRevocationStore::new();
        store.revoke("abc");
        store.revoke("abc");
        assert!(store.is_revoked("abc"));
        assert!(!store.is_revoked("other"));
    }
}
