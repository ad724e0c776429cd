//! Maps one external tour record onto a content entry and its metadata.

use crate::clients::Geocoder;
use crate::config::{ListingConfig, LocationTables};
use crate::constants::{meta_keys, metrics as metric_names};
use crate::db::ContentStore;
use crate::models::{EntryDraft, EntryStatus, TourRecord, TourStatus};
use crate::parser::{normalize_duration, to_display_date};
use crate::services::render::ContentRenderer;
use crate::services::sanitize::TextSanitizer;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    MissingTourId,
    MissingName,
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created { entry_id: i64 },
    Updated { entry_id: i64 },
    Skipped { skip: SkipReason },
    Failed { error: String },
}

impl UpsertOutcome {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

pub struct TourUpserter {
    store: Arc<dyn ContentStore>,
    geocoder: Option<Arc<dyn Geocoder>>,
    sanitizer: Arc<dyn TextSanitizer>,
    renderer: ContentRenderer,
    listing: ListingConfig,
    locations: LocationTables,
}

impl TourUpserter {
    #[must_use]
    pub fn new(
        store: Arc<dyn ContentStore>,
        geocoder: Option<Arc<dyn Geocoder>>,
        sanitizer: Arc<dyn TextSanitizer>,
        listing: ListingConfig,
        locations: LocationTables,
    ) -> Self {
        let renderer = ContentRenderer::new(listing.promo_html.clone(), sanitizer.clone());
        Self {
            store,
            geocoder,
            sanitizer,
            renderer,
            listing,
            locations,
        }
    }

    /// Upserts one raw API item; items that do not deserialize are skipped.
    pub async fn upsert_value(&self, item: Value) -> UpsertOutcome {
        match serde_json::from_value::<TourRecord>(item) {
            Ok(tour) => self.upsert(&tour).await,
            Err(e) => {
                warn!(error = %e, "Skipping malformed tour record");
                UpsertOutcome::Skipped {
                    skip: SkipReason::Malformed(e.to_string()),
                }
            }
        }
    }

    pub async fn upsert(&self, tour: &TourRecord) -> UpsertOutcome {
        let Some(tour_id) = non_blank(tour.tour_id.as_deref()) else {
            warn!("Skipping tour without tour_id");
            return UpsertOutcome::Skipped {
                skip: SkipReason::MissingTourId,
            };
        };
        let Some(name) = non_blank(tour.name.as_deref()) else {
            warn!(tour_id, "Skipping tour without name");
            return UpsertOutcome::Skipped {
                skip: SkipReason::MissingName,
            };
        };

        let existing = match self.store.find_entry_by_tour_id(tour_id).await {
            Ok(existing) => existing,
            Err(e) => {
                error!(tour_id, error = %e, "Failed to look up existing entry");
                return UpsertOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let status = if tour.status == TourStatus::SoldOut {
            EntryStatus::Draft
        } else {
            EntryStatus::Publish
        };

        let duration = normalize_duration(tour.trip_duration.as_deref().unwrap_or(""));
        let display_date = to_display_date(tour.date.as_deref().unwrap_or(""));
        let body = self.renderer.render(tour, &display_date, &duration);

        let draft = EntryDraft {
            title: self.sanitizer.text_field(name),
            post_type: self.listing.post_type.clone(),
            status,
            created_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            body,
        };

        let (entry_id, outcome) = match existing {
            Some(entry_id) => {
                if let Err(e) = self.store.update_entry(entry_id, &draft).await {
                    error!(tour_id, entry_id, error = %e, "Failed to update entry");
                    return UpsertOutcome::Failed {
                        error: e.to_string(),
                    };
                }
                (entry_id, UpsertOutcome::Updated { entry_id })
            }
            None => match self.store.create_entry(tour_id, &draft).await {
                Ok(entry_id) => (entry_id, UpsertOutcome::Created { entry_id }),
                Err(e) => {
                    error!(tour_id, error = %e, "Failed to create entry");
                    return UpsertOutcome::Failed {
                        error: e.to_string(),
                    };
                }
            },
        };

        let failed = self
            .write_metadata(entry_id, tour_id, tour, &duration, &draft.body)
            .await;

        if failed > 0 {
            return UpsertOutcome::Failed {
                error: format!("{failed} metadata writes failed for entry {entry_id}"),
            };
        }

        info!(tour_id, entry_id, outcome = outcome.label(), "Synced tour");
        outcome
    }

    /// Fixed listing metadata, in write order.
    #[must_use]
    pub fn listing_meta(
        &self,
        tour_id: &str,
        tour: &TourRecord,
        duration: &str,
    ) -> Vec<(&'static str, String)> {
        let listing = &self.listing;
        let price = tour.price_text();
        let category = tour.category();

        let gallery = self
            .locations
            .gallery(category)
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut meta = vec![
            (meta_keys::TOUR_ID, tour_id.to_string()),
            (meta_keys::TOUR_PRICE, price.clone()),
            (meta_keys::BASE_PRICE, price.clone()),
            (
                meta_keys::TOUR_IMAGE,
                self.sanitizer.url(tour.image.as_deref().unwrap_or("")),
            ),
            (
                meta_keys::TOUR_CATEGORY,
                category.unwrap_or_default().to_string(),
            ),
            (meta_keys::DURATION_DAY, duration.to_string()),
            (meta_keys::PRICE_BY, listing.price_by.clone()),
            (meta_keys::CUSTOM_LAYOUT, listing.layout_id.to_string()),
            (meta_keys::RATING, listing.rating.to_string()),
            (
                meta_keys::BOOKING_OPTION_TYPE,
                listing.booking_option_type.clone(),
            ),
            (meta_keys::GALLERY, gallery),
            (meta_keys::EXTERNAL_BOOKING, listing.external_booking.clone()),
            (
                meta_keys::HIDE_ADULT,
                listing.hide_adult_in_booking_form.clone(),
            ),
            (
                meta_keys::HIDE_CHILDREN,
                listing.hide_children_in_booking_form.clone(),
            ),
            (
                meta_keys::HIDE_INFANT,
                listing.hide_infant_in_booking_form.clone(),
            ),
            (
                meta_keys::DISABLE_ADULT_NAME,
                listing.disable_adult_name.clone(),
            ),
            (
                meta_keys::DISABLE_CHILDREN_NAME,
                listing.disable_children_name.clone(),
            ),
            (
                meta_keys::DISABLE_INFANT_NAME,
                listing.disable_infant_name.clone(),
            ),
            (meta_keys::TYPE_TOUR, listing.tour_type.clone()),
            (meta_keys::MAX_PEOPLE, listing.max_people.to_string()),
            (
                meta_keys::CALENDAR_CHECK_IN,
                listing.calendar_check_in.clone(),
            ),
            (
                meta_keys::CALENDAR_CHECK_OUT,
                listing.calendar_check_out.clone(),
            ),
            (meta_keys::CALENDAR_BASE_PRICE, price),
        ];

        if let Some(location_id) = category.and_then(|c| self.locations.location_id(c)) {
            meta.push((meta_keys::MULTI_LOCATION, format!("_{location_id}_")));
        }

        if let Some(category) = category {
            meta.push((meta_keys::ADDRESS, category.to_string()));
        }

        meta
    }

    /// Writes every metadata key, returning how many writes failed.
    async fn write_metadata(
        &self,
        entry_id: i64,
        tour_id: &str,
        tour: &TourRecord,
        duration: &str,
        body: &str,
    ) -> usize {
        let mut failed = 0;

        for (key, value) in self.listing_meta(tour_id, tour, duration) {
            failed += usize::from(!self.set_meta(entry_id, key, &value).await);
        }

        let thumbnail_id = self.locations.thumbnail_id(tour.category());
        if let Err(e) = self.store.set_thumbnail(entry_id, thumbnail_id).await {
            error!(entry_id, thumbnail_id, error = %e, "Failed to set thumbnail");
            failed += 1;
        }

        if let Some(place) = non_blank(tour.category()) {
            failed += self.write_coordinates(entry_id, place).await;
        }

        failed += usize::from(!self.set_meta(entry_id, meta_keys::CONTENT, body).await);
        failed
    }

    async fn write_coordinates(&self, entry_id: i64, place: &str) -> usize {
        let Some(geocoder) = &self.geocoder else {
            return 0;
        };

        let Some(coordinates) = geocoder.lookup(place).await else {
            metrics::counter!(metric_names::GEOCODE_LOOKUPS_TOTAL, "result" => "not_found")
                .increment(1);
            debug!(entry_id, place, "No coordinates for category");
            return 0;
        };
        metrics::counter!(metric_names::GEOCODE_LOOKUPS_TOTAL, "result" => "found").increment(1);

        let writes = [
            (meta_keys::MAP_LAT, coordinates.lat.as_str()),
            (meta_keys::MAP_LNG, coordinates.lng.as_str()),
            (meta_keys::MAP_ZOOM, self.listing.map_zoom.as_str()),
        ];

        let mut failed = 0;
        for (key, value) in writes {
            failed += usize::from(!self.set_meta(entry_id, key, value).await);
        }
        failed
    }

    async fn set_meta(&self, entry_id: i64, key: &str, value: &str) -> bool {
        match self.store.set_meta(entry_id, key, value).await {
            Ok(()) => true,
            Err(e) => {
                error!(entry_id, key, error = %e, "Failed to write metadata");
                false
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::Store;
    use crate::services::sanitize::HtmlSanitizer;

    async fn upserter() -> TourUpserter {
        let config = Config::default();
        let store = Arc::new(Store::in_memory().await.unwrap());
        TourUpserter::new(
            store,
            None,
            Arc::new(HtmlSanitizer),
            config.listing.clone(),
            config.location_tables(),
        )
    }

    fn tour(category: Option<&str>) -> TourRecord {
        TourRecord {
            tour_id: Some("T1".to_string()),
            name: Some("X".to_string()),
            price: Some(serde_json::json!(100)),
            category: category.map(str::to_string),
            image: Some("http://x/i.jpg".to_string()),
            ..TourRecord::default()
        }
    }

    fn lookup<'a>(meta: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        meta.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_listing_meta_for_mapped_category() {
        let upserter = upserter().await;
        let meta = upserter.listing_meta("T1", &tour(Some("دبی")), "3 روز");

        assert_eq!(lookup(&meta, meta_keys::TOUR_ID), Some("T1"));
        assert_eq!(lookup(&meta, meta_keys::TOUR_PRICE), Some("100"));
        assert_eq!(lookup(&meta, meta_keys::BASE_PRICE), Some("100"));
        assert_eq!(lookup(&meta, meta_keys::CALENDAR_BASE_PRICE), Some("100"));
        assert_eq!(lookup(&meta, meta_keys::GALLERY), Some("16983,17163,17164"));
        assert_eq!(lookup(&meta, meta_keys::MULTI_LOCATION), Some("_16939_"));
        assert_eq!(lookup(&meta, meta_keys::ADDRESS), Some("دبی"));
        assert_eq!(lookup(&meta, meta_keys::DURATION_DAY), Some("3 روز"));
        assert_eq!(lookup(&meta, meta_keys::CUSTOM_LAYOUT), Some("9"));
        assert_eq!(lookup(&meta, meta_keys::MAX_PEOPLE), Some("10"));
        assert_eq!(lookup(&meta, meta_keys::CALENDAR_CHECK_IN), Some("j۱۴۰۴/j۱۲/j۲۸"));
        assert_eq!(meta.first().map(|(k, _)| *k), Some(meta_keys::TOUR_ID));
    }

    #[tokio::test]
    async fn test_listing_meta_for_unmapped_category() {
        let upserter = upserter().await;
        let meta = upserter.listing_meta("T1", &tour(Some("پاریس")), "");

        assert_eq!(lookup(&meta, meta_keys::GALLERY), Some("15549,16983,17162"));
        assert_eq!(lookup(&meta, meta_keys::MULTI_LOCATION), None);
        assert_eq!(lookup(&meta, meta_keys::ADDRESS), Some("پاریس"));
    }

    #[tokio::test]
    async fn test_listing_meta_without_category() {
        let upserter = upserter().await;
        let meta = upserter.listing_meta("T1", &tour(None), "");

        assert_eq!(lookup(&meta, meta_keys::TOUR_CATEGORY), Some(""));
        assert_eq!(lookup(&meta, meta_keys::ADDRESS), None);
        assert_eq!(lookup(&meta, meta_keys::GALLERY), Some("15549,16983,17162"));
    }

    #[tokio::test]
    async fn test_blank_identifiers_are_skipped() {
        let upserter = upserter().await;

        let mut no_id = tour(None);
        no_id.tour_id = Some("   ".to_string());
        assert_eq!(
            upserter.upsert(&no_id).await,
            UpsertOutcome::Skipped {
                skip: SkipReason::MissingTourId
            }
        );

        let mut no_name = tour(None);
        no_name.name = None;
        assert_eq!(
            upserter.upsert(&no_name).await,
            UpsertOutcome::Skipped {
                skip: SkipReason::MissingName
            }
        );
    }

    #[tokio::test]
    async fn test_non_object_item_is_malformed() {
        let upserter = upserter().await;
        let outcome = upserter.upsert_value(serde_json::json!("just a string")).await;
        assert!(matches!(
            outcome,
            UpsertOutcome::Skipped {
                skip: SkipReason::Malformed(_)
            }
        ));
    }
}
