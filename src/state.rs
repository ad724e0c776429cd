use std::sync::Arc;

use crate::clients::{Geocoder, NominatimClient, TourApiClient, TourSource, build_http_client};
use crate::config::Config;
use crate::db::{ContentStore, Store};
use crate::services::{DefaultSyncService, HtmlSanitizer, SyncService, TourUpserter};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub sync_service: Arc<dyn SyncService>,
}

impl SharedState {
    /// Wires the real store, tour API and geocoder from configuration.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let api_client = build_http_client(
            config.tour_api.request_timeout_seconds,
            &config.tour_api.user_agent,
        )?;
        let source: Arc<dyn TourSource> = Arc::new(TourApiClient::new(
            api_client,
            config.tour_api.base_url.clone(),
            config.tour_api.page_size,
        ));

        let geocoder: Option<Arc<dyn Geocoder>> = if config.geocoder.enabled {
            let client = build_http_client(
                config.geocoder.request_timeout_seconds,
                &config.geocoder.user_agent,
            )?;
            Some(Arc::new(NominatimClient::new(
                client,
                config.geocoder.base_url.clone(),
            )))
        } else {
            None
        };

        Ok(Self::with_collaborators(config, store, source, geocoder))
    }

    /// Wires the sync service around caller-provided collaborators.
    #[must_use]
    pub fn with_collaborators(
        config: Config,
        store: Store,
        source: Arc<dyn TourSource>,
        geocoder: Option<Arc<dyn Geocoder>>,
    ) -> Self {
        let content_store: Arc<dyn ContentStore> = Arc::new(store.clone());

        let upserter = TourUpserter::new(
            content_store,
            geocoder,
            Arc::new(HtmlSanitizer),
            config.listing.clone(),
            config.location_tables(),
        );

        let sync_service = Arc::new(DefaultSyncService::new(
            source,
            upserter,
            config.tour_api.page_size,
        )) as Arc<dyn SyncService>;

        Self {
            config: Arc::new(config),
            store,
            sync_service,
        }
    }
}
