//! Pipeline worker: owns the debounce timer and the in-flight fetch
//!
//! Both selection slots are observed jointly. Changes are coalesced within
//! the debounce window; when the window closes with a new (category,
//! supermarket) pair, any in-flight fetch is dropped and a fetch for the new
//! pair starts. Only the latest fetch can publish.

use futures::future::BoxFuture;
use grocer_client::{DocumentSource, catalog_path};
use shared::{Category, ProductRow, Supermarket};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::{Filter, PipelineConfig, RowSet};
use crate::catalog::normalize;

type RowsFuture = BoxFuture<'static, (Filter, Vec<ProductRow>)>;

pub(crate) struct PipelineWorker {
    pub(crate) source: Arc<dyn DocumentSource>,
    pub(crate) config: PipelineConfig,
    pub(crate) category_rx: watch::Receiver<Option<Category>>,
    pub(crate) supermarket_rx: watch::Receiver<Option<Supermarket>>,
    pub(crate) rows_tx: watch::Sender<RowSet>,
    pub(crate) shutdown: CancellationToken,
    pub(crate) generation: u64,
}

impl PipelineWorker {
    pub(crate) async fn run(mut self) {
        tracing::info!("Catalog pipeline started");

        let debounce = self.config.debounce;
        let mut last: Option<Filter> = None;
        let mut in_flight: Option<RowsFuture> = None;
        // The initial selection goes through the debounce window like any change
        let mut debounce_deadline: Option<Instant> = Some(Instant::now() + debounce);

        loop {
            let sleep_until =
                debounce_deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            // Shutdown wins over a fetch completing in the same poll
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    tracing::info!("Catalog pipeline shutting down");
                    break;
                }

                changed = self.category_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    debounce_deadline = Some(Instant::now() + debounce);
                }

                changed = self.supermarket_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    debounce_deadline = Some(Instant::now() + debounce);
                }

                _ = tokio::time::sleep_until(sleep_until), if debounce_deadline.is_some() => {
                    debounce_deadline = None;

                    let filter = self.current_filter();
                    if last == Some(filter) {
                        tracing::debug!(?filter, "Filter unchanged, not refetching");
                        continue;
                    }
                    last = Some(filter);
                    tracing::debug!(?filter, "Filter changed");

                    if in_flight.take().is_some() {
                        tracing::debug!("Dropping superseded catalog fetch");
                    }

                    match filter.category {
                        None => self.publish(filter, Vec::new()),
                        Some(category) => {
                            let path = catalog_path(&self.config.path_prefix, category);
                            in_flight = Some(Box::pin(load_rows(
                                self.source.clone(),
                                path,
                                filter,
                                category,
                            )));
                        }
                    }
                }

                (filter, rows) = next_rows(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.publish(filter, rows);
                }
            }
        }

        // Dropping the in-flight future here cancels it before it can publish.
        drop(in_flight);
        tracing::info!("Catalog pipeline stopped");
    }

    fn current_filter(&mut self) -> Filter {
        Filter {
            category: *self.category_rx.borrow_and_update(),
            supermarket: *self.supermarket_rx.borrow_and_update(),
        }
    }

    fn publish(&mut self, filter: Filter, rows: Vec<ProductRow>) {
        if self.shutdown.is_cancelled() {
            tracing::debug!(?filter, "Pipeline cancelled, discarding rows");
            return;
        }
        self.generation += 1;
        tracing::debug!(
            ?filter,
            rows = rows.len(),
            generation = self.generation,
            "Publishing rows"
        );
        self.rows_tx.send_replace(RowSet {
            filter,
            rows,
            generation: self.generation,
        });
    }
}

async fn next_rows(in_flight: &mut Option<RowsFuture>) -> (Filter, Vec<ProductRow>) {
    match in_flight {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

/// Fetch and normalize one category. Failures become an empty row set.
async fn load_rows(
    source: Arc<dyn DocumentSource>,
    path: String,
    filter: Filter,
    category: Category,
) -> (Filter, Vec<ProductRow>) {
    let supermarket = filter.supermarket.map(Supermarket::id);

    let rows = match source.fetch(&path).await {
        Ok(doc) => {
            let rows = normalize(&doc, category.id(), supermarket);
            tracing::debug!(%path, count = rows.len(), "Loaded catalog rows");
            rows
        }
        Err(e) => {
            tracing::error!(%path, "Failed to load catalog: {e}");
            Vec::new()
        }
    };

    (filter, rows)
}
