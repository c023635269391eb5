use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const WIRE_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One listed event as served by the catalog. There is no unique key; two
/// records may compare equal and both are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub venue: String,
    pub event_type: String,
    pub event_name: String,
    #[serde(
        serialize_with = "serialize_start_date_time",
        deserialize_with = "deserialize_start_date_time"
    )]
    pub start_date_time: NaiveDateTime,
    #[serde(default)]
    pub price: Option<f64>,
    pub ticket_url: String,
}

/// Parses the timestamp forms the listing endpoint is known to emit: the
/// database's space-separated form, ISO local time, and RFC 3339.
pub fn parse_start_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in [
        WIRE_DATE_TIME_FORMAT,
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.naive_local())
}

fn serialize_start_date_time<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(WIRE_DATE_TIME_FORMAT))
}

fn deserialize_start_date_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_start_date_time(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognized start_date_time '{raw}'"))
    })
}
