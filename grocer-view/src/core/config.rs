use grocer_client::ClientConfig;
use grocer_client::config::DEFAULT_PATH_PREFIX;
use shared::{Category, Supermarket};
use std::str::FromStr;
use std::time::Duration;

use crate::pipeline::{DEFAULT_DEBOUNCE_MS, Filter, PipelineConfig};
use crate::table::DEFAULT_PAGE_SIZE;

/// How the CLI prints rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Catalog view configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATA_BASE_URL | http://localhost:4200 | HTTP server hosting the catalog documents |
/// | DATA_DIR | (unset) | Read documents from this directory instead of HTTP |
/// | DATA_PATH_PREFIX | /data-3 | Path prefix of category documents |
/// | REQUEST_TIMEOUT_SECS | 30 | HTTP request timeout |
/// | DEBOUNCE_MS | 100 | Filter debounce window |
/// | DEFAULT_CATEGORY | salad | Initial category; empty for none |
/// | DEFAULT_SUPERMARKET | (unset) | Initial supermarket |
/// | PAGE_SIZE | 10 | Rows per page |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | OUTPUT | table | `table` or `json` |
#[derive(Debug, Clone)]
pub struct Config {
    pub data_base_url: String,
    pub data_dir: Option<String>,
    pub path_prefix: String,
    pub request_timeout_secs: u64,
    pub debounce_ms: u64,
    pub default_category: Option<Category>,
    pub default_supermarket: Option<Supermarket>,
    pub page_size: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub output: OutputFormat,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_category = match lookup("DEFAULT_CATEGORY") {
            None => Some(Category::DEFAULT),
            Some(v) if v.trim().is_empty() => None,
            Some(v) => v.trim().parse::<Category>().ok().or_else(|| {
                tracing::warn!(value = %v, "Unknown DEFAULT_CATEGORY, using default");
                Some(Category::DEFAULT)
            }),
        };

        let default_supermarket = non_empty("DEFAULT_SUPERMARKET").and_then(|v| {
            v.trim()
                .parse::<Supermarket>()
                .inspect_err(|e| tracing::warn!("Ignoring DEFAULT_SUPERMARKET: {e}"))
                .ok()
        });

        let output = match lookup("OUTPUT").as_deref().map(str::trim) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        Self {
            data_base_url: non_empty("DATA_BASE_URL")
                .unwrap_or_else(|| "http://localhost:4200".into()),
            data_dir: non_empty("DATA_DIR"),
            path_prefix: lookup("DATA_PATH_PREFIX").unwrap_or_else(|| DEFAULT_PATH_PREFIX.into()),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS").unwrap_or(30),
            debounce_ms: parse_var(&lookup, "DEBOUNCE_MS").unwrap_or(DEFAULT_DEBOUNCE_MS),
            default_category,
            default_supermarket,
            page_size: parse_var(&lookup, "PAGE_SIZE")
                .filter(|&n: &u32| n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
            output,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.data_base_url.clone()).with_timeout(self.request_timeout_secs)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            path_prefix: self.path_prefix.clone(),
        }
    }

    pub fn initial_filter(&self) -> Filter {
        Filter {
            category: self.default_category,
            supermarket: self.default_supermarket,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
