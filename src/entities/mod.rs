pub mod prelude;

pub mod content_entries;
pub mod entry_meta;
pub mod tour_links;
