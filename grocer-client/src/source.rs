//! Catalog document sources
//!
//! A source turns a document path (`/data-3/<category>.json`) into parsed
//! JSON. Callers treat the result as untrusted.

use async_trait::async_trait;
use serde_json::Value;
use shared::Category;
use std::path::{Component, Path, PathBuf};

use crate::{ClientError, ClientResult};

/// Anything that can fetch a catalog document by path
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, path: &str) -> ClientResult<Value>;
}

/// Document path for a category under `prefix`
pub fn catalog_path(prefix: &str, category: Category) -> String {
    format!("{}/{}.json", prefix.trim_end_matches('/'), category.id())
}

/// Reads documents from a local directory laid out like the HTTP server
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a document path inside the root, refusing `..` and absolute
    /// components.
    fn resolve(&self, path: &str) -> ClientResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ClientError::InvalidResponse(format!(
                "Refusing document path outside root: {path}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, path: &str) -> ClientResult<Value> {
        let file = self.resolve(path)?;
        tracing::debug!(path = %file.display(), "Reading catalog document");

        let bytes = match tokio::fs::read(&file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClientError::NotFound(file.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }
}
