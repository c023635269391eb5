use shared::domain::EventRecord;

/// Ordered records for the current epoch. Identity is positional; identical
/// looking records are all kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<EventRecord>,
}

impl EventStore {
    pub fn replace(&mut self, events: Vec<EventRecord>) {
        self.events = events;
    }

    pub fn append(&mut self, events: Vec<EventRecord>) {
        self.events.extend(events);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(name: &str) -> EventRecord {
        EventRecord {
            venue: "Paradiso".to_string(),
            event_type: "Concert".to_string(),
            event_name: name.to_string(),
            start_date_time: NaiveDate::from_ymd_opt(2025, 5, 1)
                .and_then(|date| date.and_hms_opt(20, 0, 0))
                .expect("timestamp"),
            price: None,
            ticket_url: "https://tickets.example".to_string(),
        }
    }

    #[test]
    fn append_keeps_duplicates_in_order() {
        let mut store = EventStore::default();
        store.replace(vec![record("a"), record("b")]);
        store.append(vec![record("b"), record("c")]);

        let names: Vec<_> = store.events().iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, ["a", "b", "b", "c"]);
    }

    #[test]
    fn replace_discards_previous_records() {
        let mut store = EventStore::default();
        store.append(vec![record("old")]);
        store.replace(vec![record("new")]);
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.events()[0].event_name, "new");
    }
}
