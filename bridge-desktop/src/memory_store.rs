//! In-process credential store

use async_trait::async_trait;
use bridge_traits::{error::Result, storage::SecureStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// `SecureStore` kept in process memory.
///
/// Nothing survives a restart. Used by tests and by hosts that keep the token
/// elsewhere and only need the slot semantics. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemorySecureStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one value, e.g. a token issued by a login flow
    pub fn with_secret(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn delete_secret(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn has_secret(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemorySecureStore::new();
        assert_eq!(store.get_secret("auth_token").await.unwrap(), None);

        store.set_secret("auth_token", "abc").await.unwrap();
        assert_eq!(
            store.get_secret("auth_token").await.unwrap(),
            Some("abc".to_string())
        );
        assert!(store.has_secret("auth_token").await.unwrap());

        store.set_secret("auth_token", "def").await.unwrap();
        assert_eq!(
            store.get_secret("auth_token").await.unwrap(),
            Some("def".to_string())
        );

        store.delete_secret("auth_token").await.unwrap();
        store.delete_secret("auth_token").await.unwrap();
        assert!(!store.has_secret("auth_token").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemorySecureStore::with_secret("auth_token", "abc");
        let other = store.clone();

        other.delete_secret("auth_token").await.unwrap();
        assert_eq!(store.get_secret("auth_token").await.unwrap(), None);
    }
}
