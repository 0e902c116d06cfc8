//! Destination and hotel catalog.
//!
//! The catalog is the read-only reference data a quote is computed
//! against: coordinates per destination and a nightly rate per hotel. It
//! can be loaded from a local file, a remote URL, or the built-in sample.

mod client;
mod error;
mod sample;
mod source;
mod types;

pub use client::{CatalogClient, CatalogClientConfig};
pub use error::CatalogError;
pub use sample::sample_catalog;
pub use source::{CatalogSource, SharedCatalog};
pub use types::{Catalog, CatalogDocument, Destination, Hotel};
