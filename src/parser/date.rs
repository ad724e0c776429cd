//! Gregorian to Jalali (Shamsi) date conversion.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Cumulative day count at the start of each Gregorian month (non-leap year).
const GREGORIAN_MONTH_OFFSETS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const DAYS_PER_33_YEARS: i64 = 12053;
const DAYS_PER_4_YEARS: i64 = 1461;

/// Days in the first six Jalali months (6 * 31).
const FIRST_HALF_DAYS: i64 = 186;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("date string is too short: {0:?}")]
    TooShort(String),

    #[error("invalid gregorian date {0:?}: {1}")]
    Invalid(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Converts a valid Gregorian date to the Jalali calendar.
///
/// Counts days from a fixed epoch, then peels off 33-year and 4-year cycles.
/// Pre-epoch dates are not supported.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gregorian_to_jalali(gy: i32, gm: u32, gd: u32) -> JalaliDate {
    let gy = i64::from(gy);
    let month_index = (gm.clamp(1, 12) - 1) as usize;

    // Leap days are counted through the end of February of the current year
    let gy2 = if gm > 2 { gy + 1 } else { gy };

    let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100
        + (gy2 + 399) / 400
        + i64::from(gd)
        + GREGORIAN_MONTH_OFFSETS[month_index];

    let mut jy = -1595 + 33 * (days / DAYS_PER_33_YEARS);
    days %= DAYS_PER_33_YEARS;

    jy += 4 * (days / DAYS_PER_4_YEARS);
    days %= DAYS_PER_4_YEARS;

    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < FIRST_HALF_DAYS {
        (1 + days / 31, 1 + days % 31)
    } else {
        (
            7 + (days - FIRST_HALF_DAYS) / 30,
            1 + (days - FIRST_HALF_DAYS) % 30,
        )
    };

    JalaliDate {
        year: jy as i32,
        month: jm as u32,
        day: jd as u32,
    }
}

/// Parses the leading `YYYY-MM-DD` of an API date such as `2024-05-01T00:00:00`.
pub fn parse_gregorian(raw: &str) -> Result<NaiveDate, DateError> {
    let prefix: String = raw.trim().chars().take(10).collect();
    if prefix.chars().count() < 10 {
        return Err(DateError::TooShort(prefix));
    }

    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d")
        .map_err(|e| DateError::Invalid(prefix.clone(), e.to_string()))
}

/// Formats the tour start date for display.
///
/// Unparseable input is passed through as its 10-character prefix.
#[must_use]
pub fn to_display_date(raw: &str) -> String {
    match parse_gregorian(raw) {
        Ok(date) => gregorian_to_jalali(date.year(), date.month(), date.day()).to_string(),
        Err(e) => {
            warn!(error = %e, "Could not convert tour start date");
            raw.trim().chars().take(10).collect()
        }
    }
}
