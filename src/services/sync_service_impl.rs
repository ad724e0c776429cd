//! Default [`SyncService`] driving a [`TourSource`] into the [`TourUpserter`].

use crate::clients::TourSource;
use crate::constants::metrics as metric_names;
use crate::services::sync_service::{SyncError, SyncOutcome, SyncReport, SyncService};
use crate::services::upsert::TourUpserter;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct DefaultSyncService {
    source: Arc<dyn TourSource>,
    upserter: TourUpserter,
    page_size: u32,
    /// Overlapping triggers would interleave lookup-then-insert sequences
    run_lock: Mutex<()>,
}

impl DefaultSyncService {
    #[must_use]
    pub fn new(source: Arc<dyn TourSource>, upserter: TourUpserter, page_size: u32) -> Self {
        Self {
            source,
            upserter,
            page_size,
            run_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SyncService for DefaultSyncService {
    async fn run(&self, page: u32) -> Result<SyncOutcome, SyncError> {
        if page == 0 {
            return Err(SyncError::InvalidPage(page));
        }

        let _guard = self.run_lock.lock().await;

        let items = match self.source.fetch_page(page).await {
            Ok(items) => items,
            Err(e) if e.is_fetch_failure() => {
                error!(page, error = %e, "Error fetching data from API");
                metrics::counter!(metric_names::SYNC_RUNS_TOTAL, "outcome" => "fetch_failed")
                    .increment(1);
                return Ok(SyncOutcome::FetchFailed {
                    page,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                warn!(page, error = %e, "No tours found to sync");
                metrics::counter!(metric_names::SYNC_RUNS_TOTAL, "outcome" => "no_tours")
                    .increment(1);
                return Ok(SyncOutcome::NoTours {
                    page,
                    reason: e.to_string(),
                });
            }
        };

        let mut report = SyncReport::new(page, self.page_size);
        report.fetched = items.len();

        for item in items {
            let outcome = self.upserter.upsert_value(item).await;
            metrics::counter!(metric_names::TOURS_TOTAL, "outcome" => outcome.label())
                .increment(1);
            report.record(&outcome);
        }

        metrics::counter!(metric_names::SYNC_RUNS_TOTAL, "outcome" => "processed").increment(1);

        info!(
            event = "sync_page_finished",
            page = report.page,
            fetched = report.fetched,
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "{}",
            report.status_line()
        );

        Ok(SyncOutcome::Processed(report))
    }
}
