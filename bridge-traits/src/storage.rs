//! Credential Storage Abstraction
//!
//! A persistent key/value slot store for small secrets such as the session
//! token. Values are replaced wholesale; readers never observe a partial
//! write.

use async_trait::async_trait;

use crate::error::Result;

/// Secure credential storage trait
///
/// Abstracts platform storage mechanisms:
/// - macOS: Keychain
/// - Windows: Credential Manager
/// - Linux: Secret Service / libsecret
/// - Tests and headless hosts: in-process memory
///
/// Implementations must never log stored values.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::SecureStore;
///
/// async fn remember(store: &dyn SecureStore, token: &str) -> Result<()> {
///     store.set_secret("auth_token", token).await
/// }
/// ```
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Store a value, replacing any previous one
    async fn set_secret(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a value
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get_secret(&self, key: &str) -> Result<Option<String>>;

    /// Delete a value. Deleting a missing key succeeds.
    async fn delete_secret(&self, key: &str) -> Result<()>;

    /// Check if a value exists without handing it out
    async fn has_secret(&self, key: &str) -> Result<bool> {
        Ok(self.get_secret(key).await?.is_some())
    }
}
