use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Publish,
}

impl EntryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Publish => "publish",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "draft" {
            Self::Draft
        } else {
            Self::Publish
        }
    }
}

/// Fields written to the store on create or update.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub title: String,
    pub post_type: String,
    pub status: EntryStatus,
    /// `YYYY-MM-DD HH:MM:SS`, local time
    pub created_at: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: i64,
    pub post_type: String,
    pub title: String,
    pub status: EntryStatus,
    pub created_at: String,
    pub body: String,
    pub thumbnail_id: Option<i64>,
    pub meta: BTreeMap<String, String>,
}

impl ContentEntry {
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }
}
