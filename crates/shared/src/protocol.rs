use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::EventRecord;

/// Query string for `GET /events`. Unset filters are left out entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsQuery {
    pub offset: u64,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsPage {
    pub events: Vec<EventRecord>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenuesResponse {
    pub venues: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypesResponse {
    pub event_types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_omits_unset_filters() {
        let query = EventsQuery {
            offset: 50,
            limit: 50,
            search: None,
            venue: Some("Paradiso".to_string()),
            event_type: None,
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            end_date: None,
        };

        let value = serde_json::to_value(&query).expect("encode");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 4);
        assert_eq!(object["venue"], "Paradiso");
        assert_eq!(object["start_date"], "2025-05-01");
        assert!(!object.contains_key("search"));
    }

    #[test]
    fn page_ignores_extra_pagination_fields() {
        let page: EventsPage =
            serde_json::from_str(r#"{"total": 3, "page": 1, "limit": 50, "events": []}"#)
                .expect("decode");
        assert_eq!(page.total, 3);
        assert!(page.events.is_empty());
    }
}
