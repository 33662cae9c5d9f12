//! Shared types for Grocer
//!
//! Catalog domain types used by the document sources and the catalog view:
//! supermarket and category ids, normalized product rows, raw product
//! records, and pagination structures.

pub mod error;
pub mod models;
pub mod query;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::IdError;
pub use models::{Category, NetWeight, ProductRow, RawProductRecord, Supermarket};
pub use query::{PaginatedResponse, SortDirection};
