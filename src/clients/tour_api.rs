use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::with_query;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Tour API request failed: {0}")]
    Transport(String),

    #[error("Tour API returned status {status}")]
    Status { status: u16 },

    #[error("Tour API returned no tours")]
    Empty,

    #[error("Tour API payload is not a list of tours: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Whether the API could not be reached at all, as opposed to answering with nothing useful.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// A paged source of raw tour records.
#[async_trait]
pub trait TourSource: Send + Sync {
    /// Raw JSON items of one page, in API order.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, SourceError>;
}

pub struct TourApiClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl TourApiClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size,
        }
    }

    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        with_query(
            &self.base_url,
            &format!("limit={}&page={}", self.page_size, page),
        )
    }
}

#[async_trait]
impl TourSource for TourApiClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, SourceError> {
        let url = self.page_url(page);
        tracing::debug!(url = %url, "Fetching tour page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        parse_page(&body)
    }
}

/// Splits a page body into its items.
///
/// Empty bodies, `null` and `[]` count as "no tours"; anything that is not a
/// JSON array is malformed.
pub fn parse_page(body: &str) -> Result<Vec<Value>, SourceError> {
    if body.trim().is_empty() {
        return Err(SourceError::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

    match value {
        Value::Null => Err(SourceError::Empty),
        Value::Array(items) if items.is_empty() => Err(SourceError::Empty),
        Value::Array(items) => Ok(items),
        other => Err(SourceError::Malformed(format!(
            "expected an array, got {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let client = TourApiClient::new(Client::new(), "http://localhost:3000/tours", 10);
        assert_eq!(
            client.page_url(3),
            "http://localhost:3000/tours?limit=10&page=3"
        );
    }

    #[test]
    fn test_parse_page_items() {
        let items = parse_page(r#"[{"tour_id":"T1"},{"tour_id":"T2"}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["tour_id"], "T2");
    }

    #[test]
    fn test_parse_page_empty_variants() {
        assert!(matches!(parse_page(""), Err(SourceError::Empty)));
        assert!(matches!(parse_page("  \n"), Err(SourceError::Empty)));
        assert!(matches!(parse_page("[]"), Err(SourceError::Empty)));
        assert!(matches!(parse_page("null"), Err(SourceError::Empty)));
    }

    #[test]
    fn test_parse_page_malformed() {
        assert!(matches!(parse_page("<html>"), Err(SourceError::Malformed(_))));
        assert!(matches!(
            parse_page(r#"{"error":"boom"}"#),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(SourceError::Transport("refused".into()).is_fetch_failure());
        assert!(SourceError::Status { status: 502 }.is_fetch_failure());
        assert!(!SourceError::Empty.is_fetch_failure());
        assert!(!SourceError::Malformed("x".into()).is_fetch_failure());
    }
}
