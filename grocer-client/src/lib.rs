//! Grocer Client - catalog document sources
//!
//! Fetches category catalog documents either over HTTP or from a local
//! directory mirroring the same paths.

pub mod config;
pub mod error;
pub mod http;
pub mod source;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use source::{DocumentSource, FileSource, catalog_path};
