use tracing::{info, warn};

use crate::{criteria::FilterOptions, fetch::EventSource};

/// Fetches the venue and event-type option lists concurrently. Any failure
/// is logged and yields empty lists, which leaves filter validation off.
pub async fn load_filter_options(source: &dyn EventSource) -> FilterOptions {
    match futures::try_join!(source.list_venues(), source.list_event_types()) {
        Ok((venues, event_types)) => {
            info!(
                venues = venues.len(),
                event_types = event_types.len(),
                "loaded filter options"
            );
            FilterOptions {
                venues,
                event_types,
            }
        }
        Err(err) => {
            warn!("failed to fetch filter options: {err}");
            FilterOptions::default()
        }
    }
}
