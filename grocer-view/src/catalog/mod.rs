//! Catalog normalization
//!
//! Pure, I/O-free conversion of an untrusted catalog document into
//! [`ProductRow`](shared::ProductRow)s.

pub mod classify;
pub mod normalizer;
pub mod price;

pub use classify::{Level, Node, classify, classify_level};
pub use normalizer::normalize;
pub use price::to_pence;

#[cfg(test)]
mod tests;
