#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use toursync::clients::{Coordinates, Geocoder, SourceError, TourSource};
use toursync::config::Config;
use toursync::db::{ContentStore, Store, StoreError};
use toursync::models::{ContentEntry, EntryDraft};
use toursync::services::{DefaultSyncService, HtmlSanitizer, TourUpserter};
use toursync::state::SharedState;

/// Serves fixed pages; a missing page answers the way the API does for an empty page.
#[derive(Default)]
pub struct FakeSource {
    pub pages: HashMap<u32, Vec<Value>>,
    pub unreachable: bool,
}

impl FakeSource {
    pub fn with_page(page: u32, items: Vec<Value>) -> Self {
        let mut pages = HashMap::new();
        pages.insert(page, items);
        Self {
            pages,
            unreachable: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            pages: HashMap::new(),
            unreachable: true,
        }
    }
}

#[async_trait]
impl TourSource for FakeSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, SourceError> {
        if self.unreachable {
            return Err(SourceError::Transport("connection refused".to_string()));
        }
        match self.pages.get(&page) {
            Some(items) if !items.is_empty() => Ok(items.clone()),
            _ => Err(SourceError::Empty),
        }
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    pub known: HashMap<String, Coordinates>,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn knowing(place: &str, lat: &str, lng: &str) -> Self {
        let mut known = HashMap::new();
        known.insert(
            place.to_string(),
            Coordinates {
                lat: lat.to_string(),
                lng: lng.to_string(),
            },
        );
        Self {
            known,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn lookup(&self, place: &str) -> Option<Coordinates> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known.get(place).cloned()
    }
}

pub fn dubai_tour() -> Value {
    json!({
        "tour_id": "T1",
        "name": "X",
        "price": 100,
        "category": "دبی",
        "status": "available",
        "date": "2024-05-01T00:00:00Z",
        "trip_duration": "روز 3",
        "air_line_title": "Mahan Air",
        "hotel_class": "4",
        "serialized_city": "Dubai",
        "image": "http://x/i.jpg"
    })
}

pub async fn shared_state(
    source: FakeSource,
    geocoder: Option<Arc<dyn Geocoder>>,
) -> SharedState {
    let store = Store::in_memory().await.unwrap();
    SharedState::with_collaborators(Config::default(), store, Arc::new(source), geocoder)
}

/// Real store wrapper that fails chosen writes and records every write attempt.
pub struct FlakyStore {
    pub inner: Store,
    pub fail_create_for: Option<String>,
    pub fail_updates: AtomicBool,
    pub fail_meta_key: Option<&'static str>,
    pub meta_attempts: Mutex<Vec<(i64, String)>>,
    pub thumbnail_attempts: Mutex<Vec<i64>>,
}

impl FlakyStore {
    pub async fn new() -> Self {
        Self {
            inner: Store::in_memory().await.unwrap(),
            fail_create_for: None,
            fail_updates: AtomicBool::new(false),
            fail_meta_key: None,
            meta_attempts: Mutex::new(Vec::new()),
            thumbnail_attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn meta_keys_attempted(&self) -> Vec<String> {
        self.meta_attempts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, key)| key.clone())
            .collect()
    }

    pub fn clear_attempts(&self) {
        self.meta_attempts.lock().unwrap().clear();
        self.thumbnail_attempts.lock().unwrap().clear();
    }
}

#[async_trait]
impl ContentStore for FlakyStore {
    async fn find_entry_by_tour_id(&self, tour_id: &str) -> Result<Option<i64>, StoreError> {
        self.inner.find_entry_by_tour_id(tour_id).await
    }

    async fn create_entry(&self, tour_id: &str, draft: &EntryDraft) -> Result<i64, StoreError> {
        if self.fail_create_for.as_deref() == Some(tour_id) {
            return Err(StoreError::DuplicateLink(tour_id.to_string()));
        }
        self.inner.create_entry(tour_id, draft).await
    }

    async fn update_entry(&self, entry_id: i64, draft: &EntryDraft) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::NotFound(entry_id));
        }
        self.inner.update_entry(entry_id, draft).await
    }

    async fn set_meta(&self, entry_id: i64, key: &str, value: &str) -> Result<(), StoreError> {
        self.meta_attempts
            .lock()
            .unwrap()
            .push((entry_id, key.to_string()));
        if self.fail_meta_key == Some(key) {
            return Err(StoreError::NotFound(entry_id));
        }
        self.inner.set_meta(entry_id, key, value).await
    }

    async fn set_thumbnail(&self, entry_id: i64, thumbnail_id: i64) -> Result<(), StoreError> {
        self.thumbnail_attempts.lock().unwrap().push(entry_id);
        self.inner.set_thumbnail(entry_id, thumbnail_id).await
    }

    async fn get_entry(&self, entry_id: i64) -> Result<Option<ContentEntry>, StoreError> {
        self.inner.get_entry(entry_id).await
    }
}

/// Sync service over a [`FlakyStore`], without a geocoder.
pub fn flaky_sync_service(source: FakeSource, store: Arc<FlakyStore>) -> DefaultSyncService {
    let config = Config::default();
    let upserter = TourUpserter::new(
        store,
        None,
        Arc::new(HtmlSanitizer),
        config.listing.clone(),
        config.location_tables(),
    );
    DefaultSyncService::new(Arc::new(source), upserter, config.tour_api.page_size)
}
