//! Data models
//!
//! Catalog documents are untrusted JSON; everything here is either a fixed
//! id table or the normalized shape handed to renderers.

pub mod category;
pub mod product;
pub mod supermarket;

// Re-exports
pub use category::*;
pub use product::*;
pub use supermarket::*;
