//! Workspace umbrella crate.
//!
//! Exposes the feature flags that map onto the individual workspace crates
//! (`core-service`, `core-content`) so a host application can depend on
//! `site-admin-workspace` alone and pick its bridges through features.

pub use core_content as content;
pub use core_service::{AdminService, CoreError};
