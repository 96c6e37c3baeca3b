//! Core service façade and bootstrap helpers.
//!
//! This crate wires the host-provided bridges (HTTP transport, secure token
//! storage) and the [`AdminConfig`] into the content client every screen
//! uses. Desktop hosts typically enable the `desktop-shims` feature so
//! `reqwest` and the OS keychain are injected automatically; other hosts pass
//! their own bridges through [`AdminConfig::builder`].

pub mod error;

pub use error::{CoreError, Result};

pub use core_content as content;
pub use core_runtime::logging;
pub use core_runtime::{AdminConfig, CancellationScope, ScopeGuard, UploadPolicy};

use std::sync::Arc;

use core_auth::{CredentialStore, SessionToken};
use core_content::ContentClient;
use tracing::info;

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct AdminService {
    config: Arc<AdminConfig>,
    content: ContentClient,
}

impl AdminService {
    /// Create a service from a validated configuration.
    pub fn new(config: AdminConfig) -> Self {
        let content = ContentClient::from_config(&config);
        info!(
            api_base_url = %config.api_base_url,
            token_storage_key = %config.token_storage_key,
            "Admin service ready"
        );
        Self {
            config: Arc::new(config),
            content,
        }
    }

    /// Build the configuration from `ADMIN_*` environment variables and the
    /// compiled-in desktop bridges.
    pub fn from_env() -> Result<Self> {
        let config = AdminConfig::builder().from_env()?.build()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Typed CRUD over the managed resources
    pub fn content(&self) -> &ContentClient {
        &self.content
    }

    fn credentials(&self) -> &CredentialStore {
        self.content.credentials()
    }

    /// Store the token issued by the external login flow.
    pub async fn login(&self, token: impl Into<String>) -> Result<()> {
        let token = SessionToken::new(token)?;
        self.credentials().store(&token).await?;
        Ok(())
    }

    /// Clear the stored token. Safe to call when signed out.
    pub async fn logout(&self) {
        self.content.logout().await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.content.is_authenticated().await
    }

    /// Limits forms must check before submitting a file
    pub fn upload_policy(&self) -> &UploadPolicy {
        self.content.upload_policy()
    }

    /// Display URL for a stored image path
    pub fn image_url(&self, stored_path: &str) -> String {
        self.content.image_url(stored_path)
    }
}
