use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::{
    controller::{ApplyOutcome, EventListView, SyncController},
    criteria::{FilterField, FilterOptions},
    error::CriteriaError,
    fetch::{EventSource, FetchCompletion, FetchCoordinator, FetchTicket},
    metadata,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum BrowserEvent {
    ViewUpdated(EventListView),
}

/// Async driver around a [`SyncController`].
///
/// Fetches run as tokio tasks and report back over a channel; completions
/// are applied one at a time from `&mut self`, so controller state is never
/// mutated concurrently. Every change is published as a
/// [`BrowserEvent::ViewUpdated`].
pub struct EventBrowser {
    controller: SyncController,
    coordinator: FetchCoordinator,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    events: broadcast::Sender<BrowserEvent>,
}

impl EventBrowser {
    pub fn new(source: Arc<dyn EventSource>, controller: SyncController) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            controller,
            coordinator: FetchCoordinator::new(source),
            completions_tx,
            completions_rx,
            events,
        }
    }

    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    pub fn view(&self) -> EventListView {
        self.controller.view()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<BrowserEvent> {
        self.events.subscribe()
    }

    /// Loads venue/event-type options and hands them to the controller for
    /// filter validation.
    pub async fn load_filter_options(&mut self) -> FilterOptions {
        let source = self.coordinator.source();
        let options = metadata::load_filter_options(source.as_ref()).await;
        self.controller.set_filter_options(options.clone());
        options
    }

    pub fn refresh(&mut self) {
        let ticket = self.controller.refresh();
        self.dispatch(ticket);
    }

    pub fn set_filter_field(
        &mut self,
        field: FilterField,
        value: &str,
    ) -> Result<(), CriteriaError> {
        let ticket = self.controller.set_filter_field(field, value)?;
        self.dispatch(ticket);
        Ok(())
    }

    pub fn set_filter_field_named(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), CriteriaError> {
        let ticket = self.controller.set_filter_field_named(name, value)?;
        self.dispatch(ticket);
        Ok(())
    }

    pub fn set_search_query(&mut self, text: &str) {
        let ticket = self.controller.set_search_query(text);
        self.dispatch(ticket);
    }

    pub fn reset_filters(&mut self) {
        let ticket = self.controller.reset_filters();
        self.dispatch(ticket);
    }

    /// Returns whether a fetch was issued.
    pub fn load_more(&mut self) -> bool {
        match self.controller.load_more() {
            Some(ticket) => {
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    /// Waits for the next fetch to finish and applies it.
    pub async fn next_completion(&mut self) -> Option<ApplyOutcome> {
        let completion = self.completions_rx.recv().await?;
        let outcome = self.controller.apply(completion);
        if outcome != ApplyOutcome::DiscardedStale {
            self.publish();
        }
        Some(outcome)
    }

    /// Applies completions until the current epoch has nothing in flight.
    pub async fn settle(&mut self) {
        while self.controller.is_loading() {
            if self.next_completion().await.is_none() {
                break;
            }
        }
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        self.publish();
        let coordinator = self.coordinator.clone();
        let completions_tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let completion = coordinator.fetch(ticket).await;
            if completions_tx.send(completion).is_err() {
                warn!("event browser dropped before fetch completed");
            }
        });
    }

    fn publish(&self) {
        let _ = self.events.send(BrowserEvent::ViewUpdated(self.controller.view()));
    }
}
