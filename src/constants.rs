/// Metadata keys written onto every synced listing.
pub mod meta_keys {
    pub const TOUR_ID: &str = "tour_id";
    pub const TOUR_PRICE: &str = "tour_price";
    pub const BASE_PRICE: &str = "base_price";
    pub const TOUR_IMAGE: &str = "tour_image";
    pub const TOUR_CATEGORY: &str = "tour_category";
    pub const DURATION_DAY: &str = "duration_day";
    pub const PRICE_BY: &str = "tour_price_by";
    pub const CUSTOM_LAYOUT: &str = "st_custom_layout_new";
    pub const RATING: &str = "rating";
    pub const BOOKING_OPTION_TYPE: &str = "st_booking_option_type";
    pub const GALLERY: &str = "gallery";

    pub const EXTERNAL_BOOKING: &str = "st_tour_external_booking";
    pub const HIDE_ADULT: &str = "hide_adult_in_booking_form";
    pub const HIDE_CHILDREN: &str = "hide_children_in_booking_form";
    pub const HIDE_INFANT: &str = "hide_infant_in_booking_form";
    pub const DISABLE_ADULT_NAME: &str = "disable_adult_name";
    pub const DISABLE_CHILDREN_NAME: &str = "disable_children_name";
    pub const DISABLE_INFANT_NAME: &str = "disable_infant_name";
    pub const TYPE_TOUR: &str = "type_tour";
    pub const MAX_PEOPLE: &str = "max_people";
    pub const CALENDAR_CHECK_IN: &str = "calendar_check_in";
    pub const CALENDAR_CHECK_OUT: &str = "calendar_check_out";
    pub const CALENDAR_BASE_PRICE: &str = "calendar_base_price";

    pub const MULTI_LOCATION: &str = "multi_location[]";
    pub const ADDRESS: &str = "address";

    pub const MAP_LAT: &str = "st_google_map_lat";
    pub const MAP_LNG: &str = "st_google_map_lng";
    pub const MAP_ZOOM: &str = "st_google_map_zoom";

    pub const CONTENT: &str = "content";
}

pub mod metrics {
    pub const TOURS_TOTAL: &str = "toursync_tours_total";

    pub const GEOCODE_LOOKUPS_TOTAL: &str = "toursync_geocode_lookups_total";

    pub const SYNC_RUNS_TOTAL: &str = "toursync_sync_runs_total";
}
