use std::{fmt, sync::Arc};

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{EventTypesResponse, EventsPage, EventsQuery, VenuesResponse};
use tracing::debug;

use crate::{criteria::FilterCriteria, error::FetchError};

/// Version tag of the criteria a fetch was issued for. Bumped on every
/// criteria change or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(pub u64);

impl Epoch {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to perform one page fetch and to decide, once it
/// resolves, whether its result may still be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: Epoch,
    pub offset: u64,
    pub limit: u32,
    pub criteria: FilterCriteria,
}

impl FetchTicket {
    pub fn query(&self) -> EventsQuery {
        self.criteria.to_query(self.offset, self.limit)
    }

    pub fn is_initial(&self) -> bool {
        self.offset == 0
    }
}

#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<EventsPage, FetchError>,
}

/// Paginated, filterable event listing.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, query: &EventsQuery) -> Result<EventsPage, FetchError>;
    async fn list_venues(&self) -> Result<Vec<String>, FetchError>;
    async fn list_event_types(&self) -> Result<Vec<String>, FetchError>;
}

/// `EventSource` backed by the HTTP listing API rooted at `base_url`.
pub struct HttpEventSource {
    http: Client,
    base_url: String,
}

impl HttpEventSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self, query: &EventsQuery) -> Result<EventsPage, FetchError> {
        let page = self
            .http
            .get(format!("{}/events", self.base_url))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }

    async fn list_venues(&self) -> Result<Vec<String>, FetchError> {
        let body: VenuesResponse = self
            .http
            .get(format!("{}/venues", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.venues)
    }

    async fn list_event_types(&self) -> Result<Vec<String>, FetchError> {
        let body: EventTypesResponse = self
            .http
            .get(format!("{}/event-types", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.event_types)
    }
}

/// Performs ticketed fetches. It never touches controller state; the caller
/// reconciles each `FetchCompletion` against the epoch current at that time.
#[derive(Clone)]
pub struct FetchCoordinator {
    source: Arc<dyn EventSource>,
}

impl FetchCoordinator {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Arc<dyn EventSource> {
        Arc::clone(&self.source)
    }

    pub async fn fetch(&self, ticket: FetchTicket) -> FetchCompletion {
        let query = ticket.query();
        debug!(
            epoch = %ticket.epoch,
            offset = query.offset,
            limit = query.limit,
            "fetching events page"
        );
        let result = self.source.fetch_events(&query).await;
        FetchCompletion { ticket, result }
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
