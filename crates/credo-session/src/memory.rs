//! In-process credential store.

use std::sync::RwLock;

use credo_core::{ApiKey, BearerToken, CredentialStore};

#[derive(Debug, Default)]
struct Slots {
    bearer: Option<String>,
    api_key: Option<String>,
}

/// Credential store backed by process memory.
///
/// Suitable for a single application instance; credentials do not
/// survive the process. Mutual exclusion between the slots is enforced
/// on every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<Slots>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn set_bearer(&self, token: &BearerToken) {
        let mut slots = self.slots.write().unwrap();
        slots.bearer = Some(token.as_str().to_string());
        slots.api_key = None;
    }

    fn set_api_key(&self, key: &ApiKey) {
        let mut slots = self.slots.write().unwrap();
        slots.api_key = Some(key.as_str().to_string());
        slots.bearer = None;
    }

    fn bearer(&self) -> Option<BearerToken> {
        let slots = self.slots.read().unwrap();
        slots.bearer.as_deref().map(BearerToken::new)
    }

    fn api_key(&self) -> Option<ApiKey> {
        let slots = self.slots.read().unwrap();
        slots.api_key.as_deref().map(ApiKey::new)
    }

    fn clear_all(&self) {
        let mut slots = self.slots.write().unwrap();
        slots.bearer = None;
        slots.api_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::CredentialKind;

    #[test]
    fn round_trip_bearer() {
        let store = MemoryStore::new();
        store.set_bearer(&BearerToken::new("tok-1"));

        assert_eq!(store.bearer().unwrap().as_str(), "tok-1");
        assert!(store.api_key().is_none());
        assert_eq!(store.current_kind(), CredentialKind::Bearer);
    }

    #[test]
    fn setting_api_key_evicts_bearer() {
        let store = MemoryStore::new();
        store.set_bearer(&BearerToken::new("tok-1"));
        store.set_api_key(&ApiKey::new("key-1"));

        assert!(store.bearer().is_none());
        assert_eq!(store.api_key().unwrap().as_str(), "key-1");
        assert_eq!(store.current_kind(), CredentialKind::ApiKey);
    }

    #[test]
    fn setting_bearer_evicts_api_key() {
        let store = MemoryStore::new();
        store.set_api_key(&ApiKey::new("key-1"));
        store.set_bearer(&BearerToken::new("tok-1"));

        assert!(store.api_key().is_none());
        assert_eq!(store.current_kind(), CredentialKind::Bearer);
    }

    #[test]
    fn clear_all_empties_both_slots() {
        let store = MemoryStore::new();
        store.set_bearer(&BearerToken::new("tok-1"));
        store.clear_all();

        assert!(store.bearer().is_none());
        assert!(store.api_key().is_none());
        assert_eq!(store.current_kind(), CredentialKind::None);
    }

    #[test]
    fn empty_store_reports_none() {
        let store = MemoryStore::new();
        assert_eq!(store.current_kind(), CredentialKind::None);
        assert!(store.current().is_none());
    }
}
