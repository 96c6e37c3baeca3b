//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the admin client core:
//! - Configuration management (`AdminConfig`, `UploadPolicy`)
//! - Logging and tracing infrastructure
//! - Cancellation scopes binding requests to a screen's lifetime
//!
//! ## Overview
//!
//! Other crates depend on this one for their settings, their logging
//! conventions and the cooperative cancellation primitive the request
//! executor honours.

pub mod config;
pub mod error;
pub mod logging;
pub mod scope;

pub use config::{AdminConfig, AdminConfigBuilder, UploadPolicy, UploadRejection};
pub use error::{Error, Result};
pub use scope::{CancellationScope, ScopeGuard};
