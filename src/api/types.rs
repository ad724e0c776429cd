use serde::Serialize;

use crate::models::ContentEntry;
use crate::services::SyncOutcome;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncRunDto {
    /// Present only when the page was processed
    pub status_line: Option<String>,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

impl From<SyncOutcome> for SyncRunDto {
    fn from(outcome: SyncOutcome) -> Self {
        Self {
            status_line: outcome.status_line(),
            outcome,
        }
    }
}

pub type EntryDto = ContentEntry;

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub database: bool,
    pub entries: u64,
    pub uptime_secs: u64,
    pub version: &'static str,
}
