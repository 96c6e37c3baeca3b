//! # Host Bridge Traits
//!
//! Platform abstraction traits the admin client core depends on.
//!
//! ## Overview
//!
//! This crate defines the contract between the core crates and
//! platform-specific implementations. Each trait is a capability the core
//! needs but that a host provides differently (desktop, headless test
//! harness, embedded webview).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP with JSON and multipart bodies
//! - [`SecureStore`](storage::SecureStore) - Persistent slot storage for the session token
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | Tests    | `bridge-desktop::MemorySecureStore`, mocks | ✅ Available |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Adapters should:
//!
//! - Report "no response was received" as `BridgeError::Network`
//! - Return every received HTTP response as `Ok`, whatever its status
//! - Keep secrets out of error messages
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so handles can be shared across
//! async tasks behind `Arc`.

pub mod error;
pub mod http;
pub mod storage;

pub use error::BridgeError;

pub use http::{
    FilePart, FormValue, HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse,
    MultipartForm,
};
pub use storage::SecureStore;
