//! Epoch-tagged synchronization of a paginated, filterable event listing.
//!
//! [`SyncController`] holds the criteria, cursor and accumulated records and
//! is driven by intents and fetch completions. [`EventBrowser`] runs the
//! fetches on tokio and feeds their results back to the controller.

pub mod browser;
pub mod controller;
pub mod criteria;
pub mod cursor;
pub mod error;
pub mod fetch;
pub mod metadata;
pub mod store;

pub use browser::{BrowserEvent, EventBrowser};
pub use controller::{ApplyOutcome, EventListView, LoadingIndicator, SyncController};
pub use criteria::{FilterCriteria, FilterField, FilterOptions};
pub use cursor::{LoadState, PaginationCursor, DEFAULT_PAGE_LIMIT};
pub use error::{CriteriaError, FetchError, FETCH_FAILED_MESSAGE};
pub use fetch::{
    Epoch, EventSource, FetchCompletion, FetchCoordinator, FetchTicket, HttpEventSource,
};
pub use metadata::load_filter_options;
pub use store::EventStore;
