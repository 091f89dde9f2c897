//! Persisted session state over a key-value browser store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use libris_core::UserId;

const KEY_CREDENTIAL: &str = "token";
const KEY_USER_ID: &str = "userId";
const KEY_USERNAME: &str = "username";

/// Single-key store contract (the shape of browser local/session storage).
///
/// No atomicity is assumed beyond individual operations.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Auxiliary profile fields persisted alongside the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
}

/// Exclusive owner of the persisted credential.
///
/// The guard and the request pipeline only ever read it, or ask it to
/// `establish`/`clear`; nothing else touches the underlying keys. The backing
/// store is injected so tests can substitute [`MemoryStore`].
#[derive(Clone)]
pub struct CredentialStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Current raw credential. Absence is not an error.
    pub fn credential(&self) -> Option<String> {
        self.kv.get(KEY_CREDENTIAL)
    }

    /// Auxiliary profile fields, if a session has been established.
    pub fn profile(&self) -> Option<UserProfile> {
        let user_id = self.kv.get(KEY_USER_ID)?;
        let username = self.kv.get(KEY_USERNAME)?;
        Some(UserProfile {
            user_id: UserId::new(user_id),
            username,
        })
    }

    /// Persist a fresh credential and its profile fields.
    ///
    /// Called once per successful login/registration response; the credential
    /// survives page reloads through the backing store.
    pub fn establish(&self, credential: &str, profile: &UserProfile) {
        self.kv.set(KEY_CREDENTIAL, credential);
        self.kv.set(KEY_USER_ID, profile.user_id.as_str());
        self.kv.set(KEY_USERNAME, &profile.username);
        tracing::debug!(user = %profile.username, "session established");
    }

    /// Remove the credential and all profile fields.
    ///
    /// The credential key goes first: a concurrent `credential()` call can
    /// never observe a session whose auxiliary fields are already gone.
    /// Clearing an already-empty store is a no-op.
    pub fn clear(&self) {
        self.kv.remove(KEY_CREDENTIAL);
        self.kv.remove(KEY_USER_ID);
        self.kv.remove(KEY_USERNAME);
    }
}

/// In-process [`KeyValueStore`].
///
/// The default backing store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStore::new()))
    }

    fn profile() -> UserProfile {
        UserProfile {
            user_id: UserId::new("7"),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn empty_store_has_no_credential() {
        let store = store();
        assert_eq!(store.credential(), None);
        assert_eq!(store.profile(), None);
    }

    #[test]
    fn establish_then_read_back() {
        let store = store();
        store.establish("aaa.bbb.ccc", &profile());

        assert_eq!(store.credential().as_deref(), Some("aaa.bbb.ccc"));
        assert_eq!(store.profile(), Some(profile()));
    }

    #[test]
    fn clear_removes_credential_and_profile() {
        let store = store();
        store.establish("aaa.bbb.ccc", &profile());
        store.clear();

        assert_eq!(store.credential(), None);
        assert_eq!(store.profile(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = store();
        store.establish("aaa.bbb.ccc", &profile());
        store.clear();
        store.clear();

        assert_eq!(store.credential(), None);
        assert_eq!(store.profile(), None);
    }

    #[test]
    fn establish_overwrites_previous_session() {
        let store = store();
        store.establish("aaa.bbb.ccc", &profile());

        let next = UserProfile {
            user_id: UserId::new("8"),
            username: "bob".to_string(),
        };
        store.establish("ddd.eee.fff", &next);

        assert_eq!(store.credential().as_deref(), Some("ddd.eee.fff"));
        assert_eq!(store.profile(), Some(next));
    }
}
