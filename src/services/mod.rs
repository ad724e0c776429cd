pub mod render;
pub use render::ContentRenderer;

pub mod sanitize;
pub use sanitize::{HtmlSanitizer, TextSanitizer};

pub mod upsert;
pub use upsert::{SkipReason, TourUpserter, UpsertOutcome};

pub mod sync_service;
pub mod sync_service_impl;
pub use sync_service::{SyncError, SyncOutcome, SyncReport, SyncService};
pub use sync_service_impl::DefaultSyncService;
