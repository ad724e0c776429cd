use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub tour_api: TourApiConfig,

    pub geocoder: GeocoderConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,

    pub listing: ListingConfig,

    pub locations: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human readable format
    pub log_json: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/toursync.db".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TourApiConfig {
    pub base_url: String,

    /// Sent as `limit=` and echoed in the status line
    pub page_size: u32,

    pub request_timeout_seconds: u64,

    pub user_agent: String,
}

impl Default for TourApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://94.182.62.3:3000/tours".to_string(),
            page_size: 10,
            request_timeout_seconds: 30,
            user_agent: concat!("toursync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub enabled: bool,

    pub base_url: String,

    /// Nominatim's usage policy rejects requests without an identifying agent
    pub user_agent: String,

    pub request_timeout_seconds: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "TourSync/1.0".to_string(),
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    /// Query parameter whose presence triggers a sync on `GET /`
    pub trigger_param: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 6790,
            trigger_param: "tour_sync".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

/// Fixed values written onto every synced listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub post_type: String,

    pub price_by: String,

    pub layout_id: i64,

    pub rating: i64,

    pub booking_option_type: String,

    pub external_booking: String,

    pub hide_adult_in_booking_form: String,

    pub hide_children_in_booking_form: String,

    pub hide_infant_in_booking_form: String,

    pub disable_adult_name: String,

    pub disable_children_name: String,

    pub disable_infant_name: String,

    pub tour_type: String,

    pub max_people: i64,

    pub calendar_check_in: String,

    pub calendar_check_out: String,

    pub map_zoom: String,

    /// Trusted markup placed above the details table
    pub promo_html: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            post_type: "st_tours".to_string(),
            price_by: "fixed".to_string(),
            layout_id: 9,
            rating: 5,
            booking_option_type: "enquire".to_string(),
            external_booking: "off".to_string(),
            hide_adult_in_booking_form: "off".to_string(),
            hide_children_in_booking_form: "off".to_string(),
            hide_infant_in_booking_form: "off".to_string(),
            disable_adult_name: "on".to_string(),
            disable_children_name: "on".to_string(),
            disable_infant_name: "on".to_string(),
            tour_type: "specific_date".to_string(),
            max_people: 10,
            calendar_check_in: "j۱۴۰۴/j۱۲/j۲۸".to_string(),
            calendar_check_out: "j۱۴۰۴/j۱۲/j۲۹".to_string(),
            map_zoom: "5".to_string(),
            promo_html: "<p>...متن تبلیغاتی درباره خدمات...</p>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationEntry {
    /// Category label as sent by the tour API
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<i64>>,
}

impl LocationEntry {
    fn full(name: &str, location_id: i64, thumbnail_id: i64, gallery: [i64; 3]) -> Self {
        Self {
            name: name.to_string(),
            location_id: Some(location_id),
            thumbnail_id: Some(thumbnail_id),
            gallery: Some(gallery.to_vec()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub default_thumbnail_id: i64,

    pub default_gallery: Vec<i64>,

    #[serde(rename = "entry")]
    pub entries: Vec<LocationEntry>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_thumbnail_id: 16983,
            default_gallery: vec![15549, 16983, 17162],
            entries: vec![
                LocationEntry::full("استانبول", 17452, 15549, [15549, 16983, 17162]),
                LocationEntry::full("دبی", 16939, 16983, [16983, 17163, 17164]),
                LocationEntry::full("مالدیو", 16941, 16984, [16984, 17165, 17166]),
                LocationEntry::full("تفلیس", 16948, 16985, [16985, 17167, 17168]),
                LocationEntry::full("آنتالیا", 16951, 16986, [16986, 17169, 17170]),
                LocationEntry::full("کوالالامپور", 16953, 16987, [16987, 17171, 17172]),
                LocationEntry::full("پاتایا", 16955, 16988, [16988, 17173, 17174]),
                LocationEntry::full("باکو", 16961, 16989, [16989, 17175, 17176]),
                LocationEntry::full("نایروبی", 16971, 16990, [16990, 17177, 17178]),
            ],
        }
    }
}

/// Category keyed lookups built once from [`LocationConfig`].
#[derive(Debug, Clone, Default)]
pub struct LocationTables {
    location_ids: HashMap<String, i64>,
    thumbnails: HashMap<String, i64>,
    galleries: HashMap<String, Vec<i64>>,
    default_thumbnail_id: i64,
    default_gallery: Vec<i64>,
}

impl LocationTables {
    #[must_use]
    pub fn from_config(config: &LocationConfig) -> Self {
        let mut tables = Self {
            default_thumbnail_id: config.default_thumbnail_id,
            default_gallery: config.default_gallery.clone(),
            ..Self::default()
        };

        for entry in &config.entries {
            if let Some(id) = entry.location_id {
                tables.location_ids.insert(entry.name.clone(), id);
            }
            if let Some(id) = entry.thumbnail_id {
                tables.thumbnails.insert(entry.name.clone(), id);
            }
            if let Some(gallery) = &entry.gallery {
                tables.galleries.insert(entry.name.clone(), gallery.clone());
            }
        }

        tables
    }

    /// Location taxonomy id; unmapped categories have none.
    #[must_use]
    pub fn location_id(&self, category: &str) -> Option<i64> {
        self.location_ids.get(category).copied()
    }

    #[must_use]
    pub fn thumbnail_id(&self, category: Option<&str>) -> i64 {
        category
            .and_then(|c| self.thumbnails.get(c).copied())
            .unwrap_or(self.default_thumbnail_id)
    }

    #[must_use]
    pub fn gallery(&self, category: Option<&str>) -> &[i64] {
        category
            .and_then(|c| self.galleries.get(c))
            .map_or(self.default_gallery.as_slice(), Vec::as_slice)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            tour_api: TourApiConfig::default(),
            geocoder: GeocoderConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
            listing: ListingConfig::default(),
            locations: LocationConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("toursync").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".toursync").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tour_api.base_url.trim().is_empty() {
            anyhow::bail!("Tour API URL cannot be empty");
        }

        if self.tour_api.page_size == 0 {
            anyhow::bail!("Tour API page size must be > 0");
        }

        if self.geocoder.enabled && self.geocoder.base_url.trim().is_empty() {
            anyhow::bail!("Geocoder URL cannot be empty when enabled");
        }

        let mut seen = HashSet::new();
        for entry in &self.locations.entries {
            if !seen.insert(entry.name.as_str()) {
                anyhow::bail!("Duplicate location entry '{}'", entry.name);
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn location_tables(&self) -> LocationTables {
        LocationTables::from_config(&self.locations)
    }
}
