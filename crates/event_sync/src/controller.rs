use chrono::{Local, NaiveDate};
use shared::domain::EventRecord;
use tracing::{debug, error, info};

use crate::{
    criteria::{FilterCriteria, FilterField, FilterOptions},
    cursor::{LoadState, PaginationCursor},
    error::{CriteriaError, FETCH_FAILED_MESSAGE},
    fetch::{Epoch, FetchCompletion, FetchTicket},
    store::EventStore,
};

/// Which spinner, if any, the rendering layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingIndicator {
    None,
    Initial,
    More,
}

/// Read-only snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct EventListView {
    pub epoch: Epoch,
    pub criteria: FilterCriteria,
    pub events: Vec<EventRecord>,
    pub total: u64,
    pub has_more: bool,
    pub state: LoadState,
    pub loading: LoadingIndicator,
    pub error: Option<String>,
}

impl EventListView {
    pub fn summary(&self) -> String {
        format!("Showing {} of {} events", self.events.len(), self.total)
    }

    /// A fetch for the current criteria succeeded and matched nothing.
    pub fn is_empty_result(&self) -> bool {
        self.state == LoadState::Ready && self.events.is_empty()
    }
}

/// How a completion was reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Belonged to a superseded epoch; nothing changed.
    DiscardedStale,
    Failed,
}

/// Where the default date range gets "today" from.
#[derive(Debug, Clone, Copy)]
enum Today {
    Fixed(NaiveDate),
    Clock(fn() -> NaiveDate),
}

impl Today {
    fn current(self) -> NaiveDate {
        match self {
            Today::Fixed(date) => date,
            Today::Clock(clock) => clock(),
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Owns the criteria, cursor and store for one browsing view and decides
/// which fetches to issue and which results to keep.
///
/// Every intent that changes the criteria starts a new [`Epoch`]: the store
/// and cursor are reset immediately and a ticket for offset 0 is returned.
/// Completions are applied through [`SyncController::apply`], which ignores
/// anything tagged with an older epoch.
#[derive(Debug, Clone)]
pub struct SyncController {
    criteria: FilterCriteria,
    cursor: PaginationCursor,
    store: EventStore,
    epoch: Epoch,
    state: LoadState,
    last_error: Option<String>,
    options: FilterOptions,
    today: Today,
}

impl SyncController {
    /// The default date range follows the local calendar day, so a reset
    /// after midnight starts from the new day.
    pub fn new(limit: u32) -> Self {
        Self::with_clock(limit, local_today)
    }

    /// Like [`SyncController::new`] with "today" pinned for the whole
    /// session.
    pub fn with_today(limit: u32, today: NaiveDate) -> Self {
        Self::build(limit, Today::Fixed(today))
    }

    /// Like [`SyncController::new`] with "today" read from `clock` at start
    /// and on every reset.
    pub fn with_clock(limit: u32, clock: fn() -> NaiveDate) -> Self {
        Self::build(limit, Today::Clock(clock))
    }

    fn build(limit: u32, today: Today) -> Self {
        Self {
            criteria: FilterCriteria::default_range(today.current()),
            cursor: PaginationCursor::new(limit),
            store: EventStore::default(),
            epoch: Epoch::default(),
            state: LoadState::Idle,
            last_error: None,
            options: FilterOptions::default(),
            today,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn events(&self) -> &[EventRecord] {
        self.store.events()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn set_filter_options(&mut self, options: FilterOptions) {
        self.options = options;
    }

    /// Starts a new epoch with the current criteria. Used for the first
    /// load of a view.
    pub fn refresh(&mut self) -> FetchTicket {
        let criteria = self.criteria.clone();
        self.begin_epoch(criteria)
    }

    pub fn set_filter_field(
        &mut self,
        field: FilterField,
        value: &str,
    ) -> Result<FetchTicket, CriteriaError> {
        let criteria = self.criteria.with_field(field, value, &self.options)?;
        Ok(self.begin_epoch(criteria))
    }

    /// [`SyncController::set_filter_field`] addressed by wire name
    /// (`venue`, `event_type`, `start_date`, `end_date`).
    pub fn set_filter_field_named(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<FetchTicket, CriteriaError> {
        let field = name.parse()?;
        self.set_filter_field(field, value)
    }

    pub fn set_search_query(&mut self, text: &str) -> FetchTicket {
        let criteria = self.criteria.with_search_query(text);
        self.begin_epoch(criteria)
    }

    /// Back to the default week range with no other filters, as a single
    /// epoch.
    pub fn reset_filters(&mut self) -> FetchTicket {
        self.begin_epoch(FilterCriteria::default_range(self.today.current()))
    }

    /// Ticket for the next page, or `None` while a fetch is in flight or
    /// when everything has been loaded. From `Error` this retries the
    /// attempt that failed.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        match self.state {
            LoadState::Idle => Some(self.refresh()),
            LoadState::LoadingInitial | LoadState::LoadingMore => {
                debug!(epoch = %self.epoch, "load more ignored: fetch in flight");
                None
            }
            LoadState::Ready | LoadState::Error => {
                if !self.cursor.has_more() {
                    debug!(epoch = %self.epoch, "load more ignored: nothing left");
                    return None;
                }
                let offset = self.cursor.next_offset();
                self.state = if offset == 0 {
                    LoadState::LoadingInitial
                } else {
                    LoadState::LoadingMore
                };
                Some(self.ticket(offset))
            }
        }
    }

    /// Reconciles a finished fetch. Stale epochs are dropped without any
    /// state change; failures keep what was loaded; successes replace the
    /// store at offset 0 and append otherwise.
    pub fn apply(&mut self, completion: FetchCompletion) -> ApplyOutcome {
        let FetchCompletion { ticket, result } = completion;
        if ticket.epoch != self.epoch {
            debug!(
                stale_epoch = %ticket.epoch,
                current_epoch = %self.epoch,
                offset = ticket.offset,
                "discarding stale events page"
            );
            return ApplyOutcome::DiscardedStale;
        }

        match result {
            Err(err) => {
                error!(
                    epoch = %ticket.epoch,
                    offset = ticket.offset,
                    "events fetch failed: {err}"
                );
                self.state = LoadState::Error;
                self.last_error = Some(FETCH_FAILED_MESSAGE.to_string());
                ApplyOutcome::Failed
            }
            Ok(page) => {
                let received = page.events.len();
                if ticket.is_initial() {
                    self.store.replace(page.events);
                } else {
                    self.store.append(page.events);
                }
                self.cursor.record_page(ticket.offset, page.total);
                self.state = LoadState::Ready;
                self.last_error = None;
                info!(
                    epoch = %ticket.epoch,
                    offset = ticket.offset,
                    received,
                    loaded = self.store.events().len(),
                    total = page.total,
                    has_more = self.cursor.has_more(),
                    "applied events page"
                );
                ApplyOutcome::Applied
            }
        }
    }

    pub fn view(&self) -> EventListView {
        let loading = match self.state {
            LoadState::LoadingInitial => LoadingIndicator::Initial,
            LoadState::LoadingMore => LoadingIndicator::More,
            LoadState::Idle | LoadState::Ready | LoadState::Error => LoadingIndicator::None,
        };
        EventListView {
            epoch: self.epoch,
            criteria: self.criteria.clone(),
            events: self.store.events().to_vec(),
            total: self.cursor.total(),
            has_more: self.cursor.has_more(),
            state: self.state,
            loading,
            error: self.last_error.clone(),
        }
    }

    fn begin_epoch(&mut self, criteria: FilterCriteria) -> FetchTicket {
        self.epoch = self.epoch.next();
        self.criteria = criteria;
        self.store.clear();
        self.cursor.reset();
        self.state = LoadState::LoadingInitial;
        debug!(epoch = %self.epoch, criteria = ?self.criteria, "started new epoch");
        self.ticket(0)
    }

    fn ticket(&self, offset: u64) -> FetchTicket {
        FetchTicket {
            epoch: self.epoch,
            offset,
            limit: self.cursor.limit(),
            criteria: self.criteria.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
