use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::with_query;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Decimal degrees as text, exactly as the service returned them
    pub lat: String,
    pub lng: String,
}

/// Resolves a place name to coordinates. Failures of any kind are `None`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, place: &str) -> Option<Coordinates>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<String>,
    lon: Option<String>,
}

/// OpenStreetMap Nominatim search client. One request per lookup, no cache.
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn search_url(&self, place: &str) -> String {
        with_query(
            &self.base_url,
            &format!("format=json&q={}", urlencoding::encode(place)),
        )
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn lookup(&self, place: &str) -> Option<Coordinates> {
        let url = self.search_url(place);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(place, error = %e, "Geocoding request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(place, status = %response.status(), "Geocoding request rejected");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(place, error = %e, "Failed to read geocoding response");
                return None;
            }
        };

        let coordinates = parse_search_response(&body);
        if coordinates.is_none() {
            debug!(place, "No coordinates found");
        }
        coordinates
    }
}

/// First result's `lat`/`lon`, if the body has one.
#[must_use]
pub fn parse_search_response(body: &str) -> Option<Coordinates> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body).ok()?;
    let first = places.into_iter().next()?;

    Some(Coordinates {
        lat: first.lat?,
        lng: first.lon?,
    })
}
