pub mod geocoder;
pub mod tour_api;

pub use geocoder::{Coordinates, Geocoder, NominatimClient};
pub use tour_api::{SourceError, TourApiClient, TourSource};

/// Build an HTTP client with the defaults shared by all outbound calls.
pub fn build_http_client(timeout_seconds: u64, user_agent: &str) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .pool_max_idle_per_host(4)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Appends a query string to a base URL that may already carry one.
pub(crate) fn with_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
