pub mod entry;
pub mod tour;

pub use entry::{ContentEntry, EntryDraft, EntryStatus};
pub use tour::{TourRecord, TourStatus};
