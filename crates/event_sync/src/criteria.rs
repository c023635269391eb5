use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use shared::protocol::EventsQuery;

use crate::error::CriteriaError;

/// Length of the default browsing window, counted from today inclusive.
pub const DEFAULT_RANGE_DAYS: u64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter fields addressable by name, using their query-string spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Venue,
    EventType,
    StartDate,
    EndDate,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Venue,
        FilterField::EventType,
        FilterField::StartDate,
        FilterField::EndDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Venue => "venue",
            FilterField::EventType => "event_type",
            FilterField::StartDate => "start_date",
            FilterField::EndDate => "end_date",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CriteriaError::UnknownField(s.to_string()))
    }
}

/// Option lists for the dropdown filters, loaded once at startup.
/// An empty list means "not loaded" and disables validation for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub venues: Vec<String>,
    pub event_types: Vec<String>,
}

impl FilterOptions {
    fn check(&self, field: FilterField, value: &str) -> Result<(), CriteriaError> {
        let known = match field {
            FilterField::Venue => &self.venues,
            FilterField::EventType => &self.event_types,
            FilterField::StartDate | FilterField::EndDate => return Ok(()),
        };
        if known.is_empty() || known.iter().any(|option| option == value) {
            Ok(())
        } else {
            Err(CriteriaError::UnknownOption {
                field,
                value: value.to_string(),
            })
        }
    }
}

/// Current venue/type/date-range/search selection. Two criteria are equal
/// only if every field is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub venue: Option<String>,
    pub event_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_query: String,
}

impl FilterCriteria {
    /// No venue/type/search filter; dates from `today` through
    /// `today + DEFAULT_RANGE_DAYS`.
    pub fn default_range(today: NaiveDate) -> Self {
        Self {
            venue: None,
            event_type: None,
            start_date: Some(today),
            end_date: today.checked_add_days(Days::new(DEFAULT_RANGE_DAYS)),
            search_query: String::new(),
        }
    }

    /// Returns a copy with `field` set from its textual form. Empty input
    /// unsets the field. On error `self` is left as it was.
    pub fn with_field(
        &self,
        field: FilterField,
        value: &str,
        options: &FilterOptions,
    ) -> Result<Self, CriteriaError> {
        let mut next = self.clone();
        let trimmed = value.trim();
        match field {
            FilterField::Venue | FilterField::EventType => {
                let parsed = if trimmed.is_empty() {
                    None
                } else {
                    options.check(field, trimmed)?;
                    Some(trimmed.to_string())
                };
                if field == FilterField::Venue {
                    next.venue = parsed;
                } else {
                    next.event_type = parsed;
                }
            }
            FilterField::StartDate | FilterField::EndDate => {
                let parsed = parse_date(field, trimmed)?;
                if field == FilterField::StartDate {
                    next.start_date = parsed;
                } else {
                    next.end_date = parsed;
                }
            }
        }
        Ok(next)
    }

    pub fn with_search_query(&self, text: &str) -> Self {
        Self {
            search_query: text.to_string(),
            ..self.clone()
        }
    }

    pub fn to_query(&self, offset: u64, limit: u32) -> EventsQuery {
        EventsQuery {
            offset,
            limit,
            search: non_blank(&self.search_query),
            venue: self.venue.as_deref().and_then(non_blank),
            event_type: self.event_type.as_deref().and_then(non_blank),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

fn parse_date(field: FilterField, value: &str) -> Result<Option<NaiveDate>, CriteriaError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CriteriaError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).expect("date")
    }

    #[test]
    fn default_range_spans_a_week_inclusive() {
        let criteria = FilterCriteria::default_range(may_first());
        assert_eq!(criteria.start_date, Some(may_first()));
        assert_eq!(criteria.end_date, NaiveDate::from_ymd_opt(2025, 5, 8));
        assert!(criteria.venue.is_none());
        assert!(criteria.search_query.is_empty());
    }

    #[test]
    fn parses_field_names_by_wire_spelling() {
        assert_eq!("event_type".parse::<FilterField>(), Ok(FilterField::EventType));
        assert_eq!(
            "eventType".parse::<FilterField>(),
            Err(CriteriaError::UnknownField("eventType".to_string()))
        );
    }

    #[test]
    fn empty_value_unsets_field() {
        let criteria = FilterCriteria::default_range(may_first());
        let next = criteria
            .with_field(FilterField::StartDate, "", &FilterOptions::default())
            .expect("unset");
        assert_eq!(next.start_date, None);
        assert_eq!(next.end_date, criteria.end_date);
    }

    #[test]
    fn rejects_malformed_date() {
        let criteria = FilterCriteria::default_range(may_first());
        let err = criteria
            .with_field(FilterField::EndDate, "05/08/2025", &FilterOptions::default())
            .expect_err("bad date");
        assert!(matches!(err, CriteriaError::InvalidDate { field: FilterField::EndDate, .. }));
    }

    #[test]
    fn validates_against_loaded_options_only() {
        let criteria = FilterCriteria::default_range(may_first());
        let options = FilterOptions {
            venues: vec!["Paradiso".to_string(), "Melkweg".to_string()],
            event_types: Vec::new(),
        };

        assert!(criteria
            .with_field(FilterField::Venue, "Bimhuis", &options)
            .is_err());
        let next = criteria
            .with_field(FilterField::Venue, "Melkweg", &options)
            .expect("known venue");
        assert_eq!(next.venue.as_deref(), Some("Melkweg"));
        assert!(criteria
            .with_field(FilterField::EventType, "Opera", &options)
            .is_ok());
    }

    #[test]
    fn query_leaves_out_blank_filters() {
        let criteria = FilterCriteria {
            venue: Some(String::new()),
            event_type: Some("Jazz".to_string()),
            start_date: None,
            end_date: None,
            search_query: "   ".to_string(),
        };
        let query = criteria.to_query(100, 50);
        assert_eq!(query.offset, 100);
        assert_eq!(query.limit, 50);
        assert_eq!(query.venue, None);
        assert_eq!(query.search, None);
        assert_eq!(query.event_type.as_deref(), Some("Jazz"));
    }
}
