pub mod date;
pub mod duration;

pub use date::{DateError, JalaliDate, gregorian_to_jalali, parse_gregorian, to_display_date};
pub use duration::normalize_duration;
