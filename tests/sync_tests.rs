mod common;

use common::{FakeGeocoder, FakeSource, FlakyStore, dubai_tour, flaky_sync_service, shared_state};
use serde_json::json;
use std::sync::Arc;
use toursync::clients::Geocoder;
use toursync::constants::meta_keys;
use toursync::models::EntryStatus;
use std::sync::atomic::Ordering;
use toursync::db::ContentStore;
use toursync::services::{SyncOutcome, SyncReport, SyncService};

#[tokio::test]
async fn test_first_sync_creates_published_listing() {
    let state = shared_state(FakeSource::with_page(1, vec![dubai_tour()]), None).await;

    let outcome = state.sync_service.run(1).await.unwrap();
    assert_eq!(
        outcome.status_line().as_deref(),
        Some("Processed 10 tours for page 1")
    );

    let entry = state
        .store
        .get_entry_by_tour_id("T1")
        .await
        .unwrap()
        .expect("entry should exist");

    assert_eq!(entry.title, "X");
    assert_eq!(entry.status, EntryStatus::Publish);
    assert_eq!(entry.post_type, "st_tours");
    assert_eq!(entry.thumbnail_id, Some(16983));
    assert_eq!(entry.meta(meta_keys::TOUR_ID), Some("T1"));
    assert_eq!(entry.meta(meta_keys::TOUR_PRICE), Some("100"));
    assert_eq!(entry.meta(meta_keys::DURATION_DAY), Some("3 روز"));
    assert_eq!(entry.meta(meta_keys::GALLERY), Some("16983,17163,17164"));
    assert_eq!(entry.meta(meta_keys::MULTI_LOCATION), Some("_16939_"));
    assert_eq!(entry.meta(meta_keys::TOUR_IMAGE), Some("http://x/i.jpg"));
    assert!(entry.body.contains(">1403/02/12</td>"));
    assert!(entry.body.contains(">Mahan Air</td>"));
    assert_eq!(entry.meta(meta_keys::CONTENT), Some(entry.body.as_str()));
}

#[tokio::test]
async fn test_second_sync_updates_in_place() {
    let state = shared_state(FakeSource::with_page(1, vec![dubai_tour()]), None).await;

    state.sync_service.run(1).await.unwrap();
    let first = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();

    let outcome = state.sync_service.run(1).await.unwrap();
    let SyncOutcome::Processed(report) = outcome else {
        panic!("expected a processed page");
    };
    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 1);

    assert_eq!(state.store.count_entries().await.unwrap(), 1);
    let second = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_sold_out_tour_becomes_draft() {
    let mut tour = dubai_tour();
    tour["status"] = json!("sold out");
    let mut shouting = dubai_tour();
    shouting["tour_id"] = json!("T2");
    shouting["status"] = json!("Sold Out");
    let state = shared_state(FakeSource::with_page(1, vec![tour, shouting]), None).await;

    state.sync_service.run(1).await.unwrap();

    let entry = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();
    assert_eq!(entry.status, EntryStatus::Draft);
    let entry = state.store.get_entry_by_tour_id("T2").await.unwrap().unwrap();
    assert_eq!(entry.status, EntryStatus::Publish);
}

#[tokio::test]
async fn test_invalid_records_do_not_stop_the_page() {
    let mut no_id = dubai_tour();
    no_id.as_object_mut().unwrap().remove("tour_id");
    let mut second = dubai_tour();
    second["tour_id"] = json!("T2");

    let state = shared_state(
        FakeSource::with_page(1, vec![no_id, json!("garbage"), second]),
        None,
    )
    .await;

    let SyncOutcome::Processed(report) = state.sync_service.run(1).await.unwrap() else {
        panic!("expected a processed page");
    };

    assert_eq!(report.fetched, 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.created, 1);
    assert_eq!(state.store.count_entries().await.unwrap(), 1);
    assert!(state.store.get_entry_by_tour_id("T2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_unmapped_category_uses_fallback_gallery() {
    let mut tour = dubai_tour();
    tour["category"] = json!("پاریس");
    let state = shared_state(FakeSource::with_page(1, vec![tour]), None).await;

    state.sync_service.run(1).await.unwrap();

    let entry = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();
    assert_eq!(entry.meta(meta_keys::GALLERY), Some("15549,16983,17162"));
    assert_eq!(entry.meta(meta_keys::MULTI_LOCATION), None);
    assert_eq!(entry.meta(meta_keys::ADDRESS), Some("پاریس"));
    assert_eq!(entry.thumbnail_id, Some(16983));
}

#[tokio::test]
async fn test_geocoded_category_sets_map_fields() {
    let geocoder = Arc::new(FakeGeocoder::knowing("دبی", "25.2048", "55.2708"));
    let state = shared_state(
        FakeSource::with_page(1, vec![dubai_tour()]),
        Some(geocoder.clone() as Arc<dyn Geocoder>),
    )
    .await;

    state.sync_service.run(1).await.unwrap();

    let entry = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();
    assert_eq!(entry.meta(meta_keys::MAP_LAT), Some("25.2048"));
    assert_eq!(entry.meta(meta_keys::MAP_LNG), Some("55.2708"));
    assert_eq!(entry.meta(meta_keys::MAP_ZOOM), Some("5"));
    assert_eq!(geocoder.call_count(), 1);
}

#[tokio::test]
async fn test_unknown_place_leaves_map_fields_unset() {
    let geocoder = Arc::new(FakeGeocoder::default());
    let state = shared_state(
        FakeSource::with_page(1, vec![dubai_tour()]),
        Some(geocoder.clone() as Arc<dyn Geocoder>),
    )
    .await;

    state.sync_service.run(1).await.unwrap();

    let entry = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();
    assert_eq!(entry.meta(meta_keys::MAP_LAT), None);
    assert_eq!(entry.meta(meta_keys::MAP_LNG), None);
    assert_eq!(entry.meta(meta_keys::MAP_ZOOM), None);
    assert_eq!(geocoder.call_count(), 1);
}

#[tokio::test]
async fn test_missing_category_skips_geocoding() {
    let mut tour = dubai_tour();
    tour.as_object_mut().unwrap().remove("category");
    let geocoder = Arc::new(FakeGeocoder::default());
    let state = shared_state(
        FakeSource::with_page(1, vec![tour]),
        Some(geocoder.clone() as Arc<dyn Geocoder>),
    )
    .await;

    state.sync_service.run(1).await.unwrap();

    assert_eq!(geocoder.call_count(), 0);
    let entry = state.store.get_entry_by_tour_id("T1").await.unwrap().unwrap();
    assert_eq!(entry.meta(meta_keys::ADDRESS), None);
}

#[tokio::test]
async fn test_unreachable_api_writes_nothing() {
    let state = shared_state(FakeSource::unreachable(), None).await;

    let outcome = state.sync_service.run(1).await.unwrap();

    assert!(matches!(outcome, SyncOutcome::FetchFailed { page: 1, .. }));
    assert_eq!(outcome.status_line(), None);
    assert_eq!(state.store.count_entries().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_page_reports_no_tours() {
    let state = shared_state(FakeSource::with_page(1, vec![dubai_tour()]), None).await;

    let outcome = state.sync_service.run(2).await.unwrap();

    assert!(matches!(outcome, SyncOutcome::NoTours { page: 2, .. }));
    assert_eq!(state.store.count_entries().await.unwrap(), 0);
}

#[tokio::test]
async fn test_page_zero_is_rejected() {
    let state = shared_state(FakeSource::default(), None).await;
    assert!(state.sync_service.run(0).await.is_err());
}

fn processed(outcome: SyncOutcome) -> SyncReport {
    match outcome {
        SyncOutcome::Processed(report) => report,
        other => panic!("expected a processed page, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_create_writes_no_metadata_and_page_continues() {
    let mut second = dubai_tour();
    second["tour_id"] = json!("T2");

    let mut store = FlakyStore::new().await;
    store.fail_create_for = Some("T1".to_string());
    let store = Arc::new(store);
    let service = flaky_sync_service(
        FakeSource::with_page(1, vec![dubai_tour(), second]),
        store.clone(),
    );

    let report = processed(service.run(1).await.unwrap());
    assert_eq!(report.failed, 1);
    assert_eq!(report.created, 1);

    assert_eq!(store.find_entry_by_tour_id("T1").await.unwrap(), None);
    let t2 = store.find_entry_by_tour_id("T2").await.unwrap().unwrap();

    let meta_attempts = store.meta_attempts.lock().unwrap().clone();
    assert!(!meta_attempts.is_empty());
    assert!(meta_attempts.iter().all(|(entry_id, _)| *entry_id == t2));
    assert_eq!(*store.thumbnail_attempts.lock().unwrap(), vec![t2]);
}

#[tokio::test]
async fn test_failed_update_writes_no_metadata() {
    let store = Arc::new(FlakyStore::new().await);
    let service = flaky_sync_service(
        FakeSource::with_page(1, vec![dubai_tour()]),
        store.clone(),
    );

    assert_eq!(processed(service.run(1).await.unwrap()).created, 1);
    store.clear_attempts();
    store.fail_updates.store(true, Ordering::SeqCst);

    let report = processed(service.run(1).await.unwrap());
    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 0);
    assert!(store.meta_attempts.lock().unwrap().is_empty());
    assert!(store.thumbnail_attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_meta_key_does_not_stop_later_keys() {
    let mut store = FlakyStore::new().await;
    store.fail_meta_key = Some(meta_keys::GALLERY);
    let store = Arc::new(store);
    let service = flaky_sync_service(
        FakeSource::with_page(1, vec![dubai_tour()]),
        store.clone(),
    );

    let report = processed(service.run(1).await.unwrap());
    assert_eq!(report.failed, 1);
    assert_eq!(report.created, 0);

    let keys = store.meta_keys_attempted();
    let gallery_at = keys.iter().position(|k| k == meta_keys::GALLERY).unwrap();
    let later = &keys[gallery_at + 1..];
    assert!(later.iter().any(|k| k == meta_keys::EXTERNAL_BOOKING));
    assert!(later.iter().any(|k| k == meta_keys::MULTI_LOCATION));
    assert_eq!(keys.last().map(String::as_str), Some(meta_keys::CONTENT));
    assert_eq!(store.thumbnail_attempts.lock().unwrap().len(), 1);

    let entry_id = store.find_entry_by_tour_id("T1").await.unwrap().unwrap();
    let entry = store.get_entry(entry_id).await.unwrap().unwrap();
    assert_eq!(entry.meta(meta_keys::GALLERY), None);
    assert_eq!(entry.meta(meta_keys::DURATION_DAY), Some("3 روز"));
    assert!(entry.meta(meta_keys::CONTENT).is_some());
}
