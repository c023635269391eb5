//! Plain-text rendering of the event list.

use event_sync::{Epoch, EventListView, LoadingIndicator};
use shared::domain::EventRecord;

const DATE_FORMAT: &str = "%a %d %b %Y %H:%M";

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) if price > 0.0 => format!("€{price:.2}"),
        _ => "—".to_string(),
    }
}

pub fn format_row(index: usize, event: &EventRecord) -> String {
    format!(
        "{:>4}. {} | {} | {} | {} | {} | {}",
        index + 1,
        event.start_date_time.format(DATE_FORMAT),
        event.venue,
        event.event_type,
        event.event_name,
        format_price(event.price),
        event.ticket_url,
    )
}

pub fn status_line(view: &EventListView) -> String {
    let status = match view.loading {
        LoadingIndicator::Initial => "Loading events...".to_string(),
        LoadingIndicator::More => format!("{} (loading more...)", view.summary()),
        LoadingIndicator::None if view.error.is_some() => view.summary(),
        LoadingIndicator::None if view.is_empty_result() => {
            "No events found. Try adjusting your filters.".to_string()
        }
        LoadingIndicator::None if view.has_more => {
            format!("{} (enter 'more' for the next page)", view.summary())
        }
        LoadingIndicator::None => view.summary(),
    };
    match &view.error {
        Some(error) => format!("{status} [error: {error}]"),
        None => status,
    }
}

/// Prints only rows that have not been shown yet for the current epoch.
#[derive(Debug, Default)]
pub struct IncrementalPrinter {
    epoch: Epoch,
    printed: usize,
}

impl IncrementalPrinter {
    pub fn pending_rows(&mut self, view: &EventListView) -> Vec<String> {
        if view.epoch != self.epoch || view.events.len() < self.printed {
            self.epoch = view.epoch;
            self.printed = 0;
        }
        let rows = view.events[self.printed..]
            .iter()
            .enumerate()
            .map(|(i, event)| format_row(self.printed + i, event))
            .collect();
        self.printed = view.events.len();
        rows
    }
}
