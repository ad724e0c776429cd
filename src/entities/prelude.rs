pub use super::content_entries::Entity as ContentEntries;
pub use super::entry_meta::Entity as EntryMeta;
pub use super::tour_links::Entity as TourLinks;
