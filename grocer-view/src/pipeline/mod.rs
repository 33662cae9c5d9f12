//! Filter query pipeline
//!
//! Two selection slots (category, supermarket) drive a background worker
//! that fetches the selected category document, normalizes it, and publishes
//! the rows through a `watch` channel. The worker lives exactly as long as
//! the [`CatalogPipeline`] handle.

mod selection;
mod worker;

pub use selection::SelectionSlot;

use grocer_client::DocumentSource;
use grocer_client::config::DEFAULT_PATH_PREFIX;
use serde::Serialize;
use shared::{Category, ProductRow, Supermarket};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use worker::PipelineWorker;

/// Debounce window for filter changes
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Combined filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Filter {
    pub category: Option<Category>,
    /// `None` means all supermarkets
    pub supermarket: Option<Supermarket>,
}

impl Filter {
    /// Filter a freshly opened view starts with
    pub fn initial() -> Self {
        Self {
            category: Some(Category::DEFAULT),
            supermarket: None,
        }
    }
}

/// Rows published for one filter combination
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    /// Filter these rows were loaded for
    pub filter: Filter,
    pub rows: Vec<ProductRow>,
    /// Increments on every publish; 0 means nothing published yet
    pub generation: u64,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub debounce: Duration,
    /// Prefix for category document paths
    pub path_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }
}

/// Handle to a running pipeline
///
/// Dropping the handle (or calling [`shutdown`](Self::shutdown)) cancels the
/// debounce timer and any in-flight fetch; nothing is published afterwards.
pub struct CatalogPipeline {
    category: SelectionSlot<Category>,
    supermarket: SelectionSlot<Supermarket>,
    rows: watch::Receiver<RowSet>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CatalogPipeline {
    /// Start the pipeline worker. Must be called inside a tokio runtime.
    pub fn spawn(source: Arc<dyn DocumentSource>, config: PipelineConfig, initial: Filter) -> Self {
        let category = SelectionSlot::new(initial.category);
        let supermarket = SelectionSlot::new(initial.supermarket);
        let (rows_tx, rows) = watch::channel(RowSet::default());
        let shutdown = CancellationToken::new();

        let worker = PipelineWorker {
            source,
            config,
            category_rx: category.subscribe(),
            supermarket_rx: supermarket.subscribe(),
            rows_tx,
            shutdown: shutdown.clone(),
            generation: 0,
        };
        let task = tokio::spawn(worker.run());

        Self {
            category,
            supermarket,
            rows,
            shutdown,
            task: Some(task),
        }
    }

    /// Start with the default settings and initial filter
    pub fn with_defaults(source: Arc<dyn DocumentSource>) -> Self {
        Self::spawn(source, PipelineConfig::default(), Filter::initial())
    }

    /// Toggle-select a category
    pub fn select_category(&self, category: Category) {
        self.category.toggle(category);
    }

    /// Toggle-select a supermarket
    pub fn select_supermarket(&self, supermarket: Supermarket) {
        self.supermarket.toggle(supermarket);
    }

    pub fn set_category(&self, category: Option<Category>) -> bool {
        self.category.set(category)
    }

    pub fn set_supermarket(&self, supermarket: Option<Supermarket>) -> bool {
        self.supermarket.set(supermarket)
    }

    pub fn is_category_selected(&self, category: Category) -> bool {
        self.category.is_selected(category)
    }

    pub fn is_supermarket_selected(&self, supermarket: Supermarket) -> bool {
        self.supermarket.is_selected(supermarket)
    }

    /// Current selection (may be ahead of the published rows)
    pub fn filter(&self) -> Filter {
        Filter {
            category: self.category.current(),
            supermarket: self.supermarket.current(),
        }
    }

    pub fn subscribe_category(&self) -> watch::Receiver<Option<Category>> {
        self.category.subscribe()
    }

    pub fn subscribe_supermarket(&self) -> watch::Receiver<Option<Supermarket>> {
        self.supermarket.subscribe()
    }

    /// Receiver for published row sets
    pub fn subscribe_rows(&self) -> watch::Receiver<RowSet> {
        self.rows.clone()
    }

    /// Latest published rows
    pub fn rows(&self) -> RowSet {
        self.rows.borrow().clone()
    }

    /// Wait for the next publish. Returns `None` once the worker has stopped.
    pub async fn next_rows(&mut self) -> Option<RowSet> {
        self.rows.changed().await.ok()?;
        Some(self.rows.borrow_and_update().clone())
    }

    /// Stop the worker and wait for it to finish
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::error!("Catalog pipeline task failed: {e}");
        }
    }
}

impl Drop for CatalogPipeline {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
