use regex::Regex;
use std::sync::OnceLock;

const DAY_WORD: &str = "روز";

/// Rewrites `روز 5` into `5 روز`. Anything else is returned trimmed but otherwise unchanged.
#[must_use]
pub fn normalize_duration(raw: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^روز\s*([0-9]+)$").expect("Invalid regex"));

    let trimmed = raw.trim();
    match re.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(days) => format!("{} {DAY_WORD}", days.as_str()),
        None => trimmed.to_string(),
    }
}
