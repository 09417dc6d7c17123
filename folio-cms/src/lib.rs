//! Reads and writes content held by the external services: blog posts in the
//! headless CMS and gallery images behind the upload endpoint.
//!
//! Reads never fail outright. When a source cannot be reached the read
//! resolves to [`Fetched::Fallback`] carrying the placeholder dataset and the
//! reason. Writes have no fallback and return the error to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod fetched;
pub mod gallery;
mod record;
pub mod source;

pub use client::CmsClient;
pub use config::FetcherConfig;
pub use error::{FetchError, Result};
pub use fetched::Fetched;
pub use gallery::{GalleryClient, ImageUpload};
pub use source::ContentSource;
