//! # Authentication Module
//!
//! Session credential handling for the admin client.
//!
//! ## Overview
//!
//! The backend issues an opaque bearer token at login (outside this crate).
//! This crate owns the single place that token lives: [`CredentialStore`]
//! reads it for every request, stores it after login and clears it on logout
//! or when the backend rejects it. No refresh or rotation exists; expiry is
//! only ever detected through a failed call.

pub mod credential_store;
pub mod error;
pub mod types;

pub use credential_store::CredentialStore;
pub use error::{AuthError, Result};
pub use types::SessionToken;
