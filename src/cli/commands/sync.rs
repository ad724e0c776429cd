use crate::config::Config;
use crate::services::SyncOutcome;
use crate::state::SharedState;

pub async fn cmd_sync_page(config: Config, page: u32) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    match state.sync_service.run(page).await? {
        SyncOutcome::Processed(report) => {
            println!("{}", report.status_line());
            println!(
                "  created: {}  updated: {}  skipped: {}  failed: {}",
                report.created, report.updated, report.skipped, report.failed
            );
        }
        SyncOutcome::FetchFailed { page, reason } => {
            println!("⚠ Could not fetch page {page}: {reason}");
        }
        SyncOutcome::NoTours { page, .. } => {
            println!("No tours found on page {page}");
        }
    }

    Ok(())
}
