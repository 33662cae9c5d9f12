//! Grocer View - catalog normalization and the filter query pipeline
//!
//! # Module layout
//!
//! ```text
//! grocer-view/src/
//! ├── catalog/     # document classification, normalization, pence
//! ├── pipeline/    # selection slots, debounced switch-latest worker
//! ├── table.rs     # column sort and pagination
//! ├── core/        # configuration
//! └── utils/       # logging
//! ```

pub mod catalog;
pub mod core;
pub mod pipeline;
pub mod table;
pub mod utils;

use grocer_client::{DocumentSource, FileSource};
use std::sync::Arc;

pub use catalog::normalize;
pub use crate::core::{Config, OutputFormat};
pub use pipeline::{CatalogPipeline, Filter, PipelineConfig, RowSet, SelectionSlot};
pub use table::{Column, TableView};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration, and install the logger
pub fn setup_environment() -> Config {
    let dotenv_result = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    if let Err(e) = dotenv_result {
        tracing::debug!("No .env loaded: {e}");
    }
    config
}

/// Build the document source named by the configuration
pub fn build_source(config: &Config) -> anyhow::Result<Arc<dyn DocumentSource>> {
    match &config.data_dir {
        Some(dir) => {
            tracing::info!(%dir, "Reading catalog documents from directory");
            Ok(Arc::new(FileSource::new(dir)))
        }
        None => {
            tracing::info!(url = %config.data_base_url, "Fetching catalog documents over HTTP");
            Ok(Arc::new(config.client_config().build_http_client()?))
        }
    }
}
