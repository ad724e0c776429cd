//! Domain service for page-at-a-time tour synchronisation.

use crate::services::upsert::UpsertOutcome;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Page numbers start at 1, got {0}")]
    InvalidPage(u32),
}

/// Per-record tally of one processed page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub page: u32,
    pub page_size: u32,
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncReport {
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            fetched: 0,
            created: 0,
            updated: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub fn record(&mut self, outcome: &UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created { .. } => self.created += 1,
            UpsertOutcome::Updated { .. } => self.updated += 1,
            UpsertOutcome::Skipped { .. } => self.skipped += 1,
            UpsertOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// The line reported back to whoever triggered the run.
    ///
    /// Always names the requested page size, not the number of records that
    /// actually made it through.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("Processed {} tours for page {}", self.page_size, self.page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The tour API could not be reached or answered with an error status.
    FetchFailed { page: u32, reason: String },

    /// The API answered but there was nothing to process.
    NoTours { page: u32, reason: String },

    Processed(SyncReport),
}

impl SyncOutcome {
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Processed(report) => Some(report.status_line()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "fetch_failed",
            Self::NoTours { .. } => "no_tours",
            Self::Processed(_) => "processed",
        }
    }
}

#[async_trait::async_trait]
pub trait SyncService: Send + Sync {
    /// Fetches one page and upserts its records in order.
    ///
    /// Fetch problems and per-record failures are reported through the
    /// returned [`SyncOutcome`], never as errors.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidPage`] for page 0.
    async fn run(&self, page: u32) -> Result<SyncOutcome, SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_uses_page_size() {
        let mut report = SyncReport::new(1, 10);
        report.record(&UpsertOutcome::Created { entry_id: 1 });
        assert_eq!(report.status_line(), "Processed 10 tours for page 1");
        assert_eq!(report.created, 1);
    }

    #[test]
    fn test_only_processed_has_status_line() {
        let outcome = SyncOutcome::NoTours {
            page: 2,
            reason: "empty".to_string(),
        };
        assert_eq!(outcome.status_line(), None);
        assert_eq!(
            SyncOutcome::Processed(SyncReport::new(3, 10)).status_line(),
            Some("Processed 10 tours for page 3".to_string())
        );
    }
}
