//! # Content Module
//!
//! Authenticated CRUD over the site's managed content: sliders, the about
//! gallery, projects, categories, the counter widget, contact addresses and
//! social links.
//!
//! ## Overview
//!
//! - [`ContentClient`] - typed list/get/create/update/delete per resource,
//!   always resolving to an [`Outcome`]
//! - [`RequestExecutor`] - bearer attachment, JSON or multipart bodies and
//!   cancellation through a `CancellationScope`
//! - [`classify`] - total mapping from failures to [`ErrorKind`]
//! - [`PathNormalizer`] - stored image paths to display URLs
//!
//! ## Usage
//!
//! ```ignore
//! use core_content::{models::SocialLink, ContentClient, Outcome};
//! use core_runtime::CancellationScope;
//!
//! let client = ContentClient::from_config(&config);
//! let scope = CancellationScope::new();
//! let _guard = scope.guard();
//!
//! if let Outcome::Success(links) = client.list::<SocialLink>(&scope).await {
//!     for link in links {
//!         println!("{} -> {}", link.text, link.url);
//!     }
//! }
//! ```

pub mod classifier;
mod envelope;
pub mod error;
pub mod executor;
pub mod facade;
pub mod models;
pub mod outcome;
pub mod paths;
pub mod resources;

pub use classifier::{classify, extract_message, ErrorKind};
pub use error::RequestFailure;
pub use executor::{RequestBody, RequestExecutor, RequestSpec};
pub use facade::ContentClient;
pub use outcome::{Failure, Outcome};
pub use paths::PathNormalizer;
pub use resources::{
    BodyEncoding, FieldSet, ImageInput, Resource, ResourceDescriptor, ResourceKind,
};
