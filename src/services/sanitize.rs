//! Cleaning of untrusted tour text before it reaches the content store.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait TextSanitizer: Send + Sync {
    /// Plain single-line text: tags removed, whitespace collapsed.
    fn text_field(&self, raw: &str) -> String;

    /// Text escaped for interpolation into HTML markup.
    fn html(&self, raw: &str) -> String;

    /// An absolute http(s) URL suitable for storage, or an empty string.
    fn url(&self, raw: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid regex"))
}

impl TextSanitizer for HtmlSanitizer {
    fn text_field(&self, raw: &str) -> String {
        let stripped = tag_regex().replace_all(raw, "");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn html(&self, raw: &str) -> String {
        html_escape::encode_quoted_attribute(raw).into_owned()
    }

    fn url(&self, raw: &str) -> String {
        match Url::parse(raw.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
            _ => String::new(),
        }
    }
}
