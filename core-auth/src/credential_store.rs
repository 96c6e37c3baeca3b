//! Session Token Storage
//!
//! The one component allowed to touch the persistent token slot. Every other
//! crate asks the [`CredentialStore`] instead of reading storage directly.
//!
//! ## Guarantees
//!
//! - [`CredentialStore::get`] never fails: an unreadable store is logged and
//!   reported as "no token", which sends the user back to login.
//! - [`CredentialStore::clear`] is idempotent and never fails.
//! - The token is written as a whole value; concurrent readers see either
//!   the old token or the new one.
//! - Token values are never logged.
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::{CredentialStore, SessionToken};
//! use std::sync::Arc;
//! # use bridge_traits::storage::SecureStore;
//! # async fn example(secure_store: Arc<dyn SecureStore>) -> core_auth::Result<()> {
//! let credentials = CredentialStore::new(secure_store, "auth_token");
//!
//! credentials.store(&SessionToken::new("issued-at-login")?).await?;
//! assert!(credentials.get().await.is_some());
//!
//! credentials.clear().await;
//! assert!(credentials.get().await.is_none());
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::SessionToken;
use bridge_traits::storage::SecureStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Accessor for the single session token slot
#[derive(Clone)]
pub struct CredentialStore {
    secure_store: Arc<dyn SecureStore>,
    key: String,
}

impl CredentialStore {
    /// Create an accessor for the slot named `key`
    pub fn new(secure_store: Arc<dyn SecureStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        debug!(key = %key, "Initializing CredentialStore");
        Self { secure_store, key }
    }

    /// Name of the storage slot
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current token, or `None` if absent, blank or unreadable
    pub async fn get(&self) -> Option<SessionToken> {
        match self.secure_store.get_secret(&self.key).await {
            Ok(raw) => {
                let token = SessionToken::from_stored(raw);
                if token.is_none() {
                    debug!(key = %self.key, "No session token stored");
                }
                token
            }
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to read session token, treating as signed out"
                );
                None
            }
        }
    }

    /// Store the token issued by the login flow, replacing any previous one
    pub async fn store(&self, token: &SessionToken) -> Result<()> {
        self.secure_store
            .set_secret(&self.key, token.expose())
            .await
            .map_err(|e| {
                warn!(key = %self.key, error = %e, "Failed to store session token");
                AuthError::SecureStorageUnavailable(e.to_string())
            })?;

        info!(key = %self.key, "Session token stored");
        Ok(())
    }

    /// Remove the token. Safe to call when nothing is stored.
    pub async fn clear(&self) {
        match self.secure_store.delete_secret(&self.key).await {
            Ok(()) => info!(key = %self.key, "Session token cleared"),
            Err(e) => warn!(
                key = %self.key,
                error = %e,
                "Failed to clear session token"
            ),
        }
    }

    /// Whether a usable token is present
    pub async fn is_authenticated(&self) -> bool {
        self.get().await.is_some()
    }

    /// Current token or [`AuthError::NotAuthenticated`]
    pub async fn require(&self) -> Result<SessionToken> {
        self.get().await.ok_or(AuthError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// Mock implementation of SecureStore for testing
    #[derive(Clone, Default)]
    struct MockSecureStore {
        storage: Arc<Mutex<HashMap<String, String>>>,
    }

    #[async_trait]
    impl SecureStore for MockSecureStore {
        async fn set_secret(&self, key: &str, value: &str) -> BridgeResult<()> {
            self.storage
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get_secret(&self, key: &str) -> BridgeResult<Option<String>> {
            Ok(self.storage.lock().await.get(key).cloned())
        }

        async fn delete_secret(&self, key: &str) -> BridgeResult<()> {
            self.storage.lock().await.remove(key);
            Ok(())
        }
    }

    /// Store whose backend is always down
    struct BrokenSecureStore;

    #[async_trait]
    impl SecureStore for BrokenSecureStore {
        async fn set_secret(&self, _key: &str, _value: &str) -> BridgeResult<()> {
            Err(BridgeError::NotAvailable("keychain locked".to_string()))
        }

        async fn get_secret(&self, _key: &str) -> BridgeResult<Option<String>> {
            Err(BridgeError::NotAvailable("keychain locked".to_string()))
        }

        async fn delete_secret(&self, _key: &str) -> BridgeResult<()> {
            Err(BridgeError::NotAvailable("keychain locked".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_and_get() {
        let credentials = CredentialStore::new(Arc::new(MockSecureStore::default()), "auth_token");

        credentials
            .store(&SessionToken::new("token_123").unwrap())
            .await
            .expect("Failed to store token");

        let token = credentials.get().await.expect("Token not found");
        assert_eq!(token.expose(), "token_123");
        assert!(credentials.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_get_missing_token() {
        let credentials = CredentialStore::new(Arc::new(MockSecureStore::default()), "auth_token");

        assert!(credentials.get().await.is_none());
        assert!(matches!(
            credentials.require().await,
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_blank_stored_value_is_absent() {
        let secure_store = MockSecureStore::default();
        secure_store.set_secret("auth_token", "").await.unwrap();

        let credentials = CredentialStore::new(Arc::new(secure_store), "auth_token");
        assert!(credentials.get().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let credentials = CredentialStore::new(Arc::new(MockSecureStore::default()), "auth_token");
        credentials
            .store(&SessionToken::new("token_123").unwrap())
            .await
            .unwrap();

        credentials.clear().await;
        credentials.clear().await;

        assert!(credentials.get().await.is_none());
    }

    #[tokio::test]
    async fn test_store_replaces_previous_token() {
        let credentials = CredentialStore::new(Arc::new(MockSecureStore::default()), "auth_token");

        credentials
            .store(&SessionToken::new("first").unwrap())
            .await
            .unwrap();
        credentials
            .store(&SessionToken::new("second").unwrap())
            .await
            .unwrap();

        assert_eq!(credentials.get().await.unwrap().expose(), "second");
    }

    #[tokio::test]
    async fn test_only_own_slot_is_touched() {
        let secure_store = MockSecureStore::default();
        secure_store.set_secret("other", "keep-me").await.unwrap();

        let credentials = CredentialStore::new(Arc::new(secure_store.clone()), "auth_token");
        credentials
            .store(&SessionToken::new("abc").unwrap())
            .await
            .unwrap();
        credentials.clear().await;

        assert_eq!(
            secure_store.get_secret("other").await.unwrap(),
            Some("keep-me".to_string())
        );
    }

    #[tokio::test]
    async fn test_broken_storage_never_fails_reads_or_clears() {
        let credentials = CredentialStore::new(Arc::new(BrokenSecureStore), "auth_token");

        assert!(credentials.get().await.is_none());
        credentials.clear().await;

        let result = credentials.store(&SessionToken::new("abc").unwrap()).await;
        assert!(matches!(result, Err(AuthError::SecureStorageUnavailable(_))));
    }
}
