use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One item of the remote tour API page.
///
/// Every field is optional on the wire; the upsert engine decides which ones
/// it cannot do without.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Kept as the raw scalar so `100` and `"100"` both survive untouched.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: TourStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trip_duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub air_line_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hotel_class: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub serialized_city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
}

impl TourRecord {
    /// Price as written into metadata; missing prices become an empty string.
    #[must_use]
    pub fn price_text(&self) -> String {
        match &self.price {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.is_f64() => match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
                _ => n.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TourStatus {
    #[default]
    Available,
    SoldOut,
    Other(String),
}

impl TourStatus {
    #[must_use]
    /// Exact match only: `"Sold Out"` is some other status and stays published.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "sold out" => Self::SoldOut,
            "available" => Self::Available,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::SoldOut => "sold out",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for TourStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TourStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_string(deserializer)?;
        Ok(raw.map_or(Self::Available, |s| Self::parse(&s)))
    }
}

/// Accepts strings, numbers and booleans; `null` and other shapes become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
