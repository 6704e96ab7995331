//! Product and insight record storage.
//!
//! This crate owns the marketplace domain records ([`Product`], [`Insight`])
//! and the persistence contract ([`ProductStore`]) consumed by the insight
//! orchestration core and the HTTP layer. Storage is plain key-by-id record
//! keeping with filter/pagination on listing; there is no algorithmic
//! content here.
//!
//! [`InMemoryStore`] is the bundled implementation. Alternative backends
//! implement [`ProductStore`] without touching the consumers.

pub mod errors;
pub mod models;
pub mod store;

pub use errors::StorageError;
pub use models::insight::{Insight, InsightType};
pub use models::product::{Product, ProductCreate, ProductFilter, ProductUpdate};
pub use store::{InMemoryStore, ProductStore};
