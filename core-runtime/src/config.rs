//! # Admin Configuration Module
//!
//! Configuration for the admin client core.
//!
//! ## Overview
//!
//! The configuration uses a builder to construct an [`AdminConfig`] holding
//! the backend location, the token storage slot, upload constraints and the
//! bridge implementations. The builder validates fail-fast so a misconfigured
//! host learns about it at startup instead of on the first request.
//!
//! ## Required
//!
//! - `api_base_url` - absolute `http`/`https` URL of the REST backend
//! - `HttpClient` and `SecureStore` bridges (desktop defaults are injected
//!   when the `desktop-shims` feature is enabled)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::AdminConfig;
//!
//! let config = AdminConfig::builder()
//!     .api_base_url("https://api.example.com")
//!     .build()?;
//! ```
//!
//! Or from the environment (`ADMIN_API_URL`, `ADMIN_TOKEN_KEY`,
//! `ADMIN_MAX_UPLOAD_MB`):
//!
//! ```ignore
//! let config = AdminConfig::builder().from_env()?.build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, SecureStore};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error as ThisError;
use url::Url;

/// Storage slot holding the session token
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "auth_token";

/// Largest accepted upload (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted MIME type prefix for uploads
pub const DEFAULT_ACCEPTED_MIME_PREFIX: &str = "image/";

pub const ENV_API_URL: &str = "ADMIN_API_URL";
pub const ENV_TOKEN_KEY: &str = "ADMIN_TOKEN_KEY";
pub const ENV_MAX_UPLOAD_MB: &str = "ADMIN_MAX_UPLOAD_MB";

/// Upload constraints the rendering layer enforces before submitting a form.
///
/// The core never applies these itself; it only carries them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub accepted_mime_prefix: String,
}

/// Why a file was refused by [`UploadPolicy::check`]
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("File is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("File type '{mime_type}' is not accepted, expected {expected_prefix}*")]
    UnsupportedType {
        mime_type: String,
        expected_prefix: String,
    },
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_mime_prefix: DEFAULT_ACCEPTED_MIME_PREFIX.to_string(),
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_accepted_mime_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.accepted_mime_prefix = prefix.into();
        self
    }

    /// Check a candidate file. Size is checked before type.
    pub fn check(&self, size_bytes: u64, mime_type: &str) -> std::result::Result<(), UploadRejection> {
        if size_bytes > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                size: size_bytes,
                max: self.max_bytes,
            });
        }

        if !mime_type.starts_with(&self.accepted_mime_prefix) {
            return Err(UploadRejection::UnsupportedType {
                mime_type: mime_type.to_string(),
                expected_prefix: self.accepted_mime_prefix.clone(),
            });
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_bytes == 0 {
            return Err(Error::Config(
                "Upload size limit must be greater than 0 bytes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Admin client configuration.
///
/// Use [`AdminConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct AdminConfig {
    /// Backend base URL without a trailing slash
    pub api_base_url: String,

    /// Storage key of the session token slot
    pub token_storage_key: String,

    /// Constraints surfaced to forms that upload images
    pub upload_policy: UploadPolicy,

    /// Per-request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,

    pub http_client: Arc<dyn HttpClient>,

    pub secure_store: Arc<dyn SecureStore>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("api_base_url", &self.api_base_url)
            .field("token_storage_key", &self.token_storage_key)
            .field("upload_policy", &self.upload_policy)
            .field("request_timeout", &self.request_timeout)
            .field("http_client", &"HttpClient { ... }")
            .field("secure_store", &"SecureStore { ... }")
            .finish()
    }
}

impl AdminConfig {
    pub fn builder() -> AdminConfigBuilder {
        AdminConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// This checks:
    /// - the base URL is an absolute http(s) URL
    /// - the token storage key is not blank
    /// - the upload policy is usable
    pub fn validate(&self) -> Result<()> {
        normalize_base_url(&self.api_base_url)?;

        if self.token_storage_key.trim().is_empty() {
            return Err(Error::Config(
                "Token storage key cannot be empty".to_string(),
            ));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        self.upload_policy.validate()
    }
}

/// Parse and canonicalise a backend base URL.
///
/// Query strings and fragments are rejected; a trailing `/` is dropped so
/// paths can be appended with a single separator.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", trimmed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::Config(format!(
            "API base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::Config(
            "API base URL cannot contain a query string or fragment".to_string(),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Desktop: enable the 'desktop-shims' feature to use ReqwestHttpClient. \
                 Other hosts: inject an HttpClient with .http_client()."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn secure_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "SecureStore".to_string(),
        message: "SecureStore implementation is required for the session token. \
                 Desktop: enable the 'desktop-shims' feature to use KeyringSecureStore. \
                 Other hosts: inject a SecureStore with .secure_store()."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Option<Duration>) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = match timeout {
        Some(timeout) => ReqwestHttpClient::with_timeout(timeout),
        None => ReqwestHttpClient::new(),
    }
    .map_err(|e| Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: e.to_string(),
    })?;

    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Option<Duration>) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_secure_store() -> Result<Arc<dyn SecureStore>> {
    use bridge_desktop::KeyringSecureStore;

    Ok(Arc::new(KeyringSecureStore::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_secure_store() -> Result<Arc<dyn SecureStore>> {
    Err(secure_store_missing_error())
}

/// Builder for [`AdminConfig`]
#[derive(Default)]
pub struct AdminConfigBuilder {
    api_base_url: Option<String>,
    token_storage_key: Option<String>,
    upload_policy: Option<UploadPolicy>,
    request_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
}

impl AdminConfigBuilder {
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn token_storage_key(mut self, key: impl Into<String>) -> Self {
        self.token_storage_key = Some(key.into());
        self
    }

    pub fn upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = Some(policy);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    /// Seed unset values from the process environment.
    pub fn from_env(self) -> Result<Self> {
        self.from_lookup(|name| std::env::var(name).ok())
    }

    /// Seed unset values from an arbitrary variable lookup.
    ///
    /// Values already set on the builder win over the lookup.
    pub fn from_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_base_url.is_none() {
            self.api_base_url = lookup(ENV_API_URL);
        }

        if self.token_storage_key.is_none() {
            self.token_storage_key = lookup(ENV_TOKEN_KEY);
        }

        if self.upload_policy.is_none() {
            if let Some(raw) = lookup(ENV_MAX_UPLOAD_MB) {
                let mb: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "{} must be a whole number of megabytes, got '{}'",
                        ENV_MAX_UPLOAD_MB, raw
                    ))
                })?;
                self.upload_policy =
                    Some(UploadPolicy::default().with_max_bytes(mb.saturating_mul(1024 * 1024)));
            }
        }

        Ok(self)
    }

    /// Builds the final `AdminConfig`.
    ///
    /// Returns an error if the base URL is missing or invalid, a bridge is
    /// missing and no desktop default is compiled in, or a value fails
    /// validation.
    pub fn build(self) -> Result<AdminConfig> {
        let raw_url = self.api_base_url.ok_or_else(|| {
            Error::Config(format!(
                "API base URL is required. Use .api_base_url() or set {}.",
                ENV_API_URL
            ))
        })?;
        let api_base_url = normalize_base_url(&raw_url)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(self.request_timeout)?,
        };

        let secure_store = match self.secure_store {
            Some(store) => store,
            None => provide_default_secure_store()?,
        };

        let config = AdminConfig {
            api_base_url,
            token_storage_key: self
                .token_storage_key
                .unwrap_or_else(|| DEFAULT_TOKEN_STORAGE_KEY.to_string()),
            upload_policy: self.upload_policy.unwrap_or_default(),
            request_timeout: self.request_timeout,
            http_client,
            secure_store,
        };

        config.validate()?;

        Ok(config)
    }
}
