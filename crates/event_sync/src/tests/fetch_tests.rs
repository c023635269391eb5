use std::collections::HashMap;

use super::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ListingState {
    seen_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn list_events(
    State(state): State<ListingState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.seen_queries.lock().await.push(params);
    Json(json!({
        "total": 2,
        "page": 1,
        "limit": 50,
        "events": [
            {
                "venue": "Paradiso",
                "event_type": "Concert",
                "event_name": "Late Set",
                "start_date_time": "2025-05-01 20:00:00",
                "ticket_url": "https://tickets.example/late-set",
                "price": 24.5
            },
            {
                "venue": "Paradiso",
                "event_type": "Concert",
                "event_name": "Late Set",
                "start_date_time": "2025-05-01 20:00:00",
                "ticket_url": "https://tickets.example/late-set",
                "price": null
            }
        ]
    }))
}

async fn list_venues() -> Json<Value> {
    Json(json!({ "venues": ["Melkweg", "Paradiso"] }))
}

async fn list_event_types() -> Json<Value> {
    Json(json!({ "event_types": ["Concert", "Theatre"] }))
}

async fn broken_listing() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_listing_server() -> anyhow::Result<(String, ListingState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ListingState::default();
    let app = Router::new()
        .route("/api/events", get(list_events))
        .route("/api/venues", get(list_venues))
        .route("/api/event-types", get(list_event_types))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api/"), state))
}

fn ticket(offset: u64) -> FetchTicket {
    let today = NaiveDate::from_ymd_opt(2025, 5, 1).expect("date");
    FetchTicket {
        epoch: Epoch(3),
        offset,
        limit: 50,
        criteria: FilterCriteria {
            venue: Some("Paradiso".to_string()),
            ..FilterCriteria::default_range(today)
        },
    }
}

#[tokio::test]
async fn fetch_sends_offset_limit_and_only_set_filters() {
    let (base_url, state) = spawn_listing_server().await.expect("server");
    let coordinator = FetchCoordinator::new(Arc::new(HttpEventSource::new(base_url)));

    let completion = coordinator.fetch(ticket(50)).await;

    assert_eq!(completion.ticket.epoch, Epoch(3));
    let page = completion.result.expect("page");
    assert_eq!(page.total, 2);
    assert_eq!(page.events.len(), 2);
    assert_eq!(page.events[0].price, Some(24.5));

    let seen = state.seen_queries.lock().await;
    let query = &seen[0];
    assert_eq!(query.get("offset").map(String::as_str), Some("50"));
    assert_eq!(query.get("limit").map(String::as_str), Some("50"));
    assert_eq!(query.get("venue").map(String::as_str), Some("Paradiso"));
    assert_eq!(query.get("start_date").map(String::as_str), Some("2025-05-01"));
    assert_eq!(query.get("end_date").map(String::as_str), Some("2025-05-08"));
    assert!(!query.contains_key("search"));
    assert!(!query.contains_key("event_type"));
}

#[tokio::test]
async fn lists_filter_option_metadata() {
    let (base_url, _state) = spawn_listing_server().await.expect("server");
    let source = HttpEventSource::new(base_url);

    assert_eq!(
        source.list_venues().await.expect("venues"),
        vec!["Melkweg".to_string(), "Paradiso".to_string()]
    );
    assert_eq!(
        source.list_event_types().await.expect("types"),
        vec!["Concert".to_string(), "Theatre".to_string()]
    );
}

#[tokio::test]
async fn server_error_status_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/events", get(broken_listing));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let coordinator =
        FetchCoordinator::new(Arc::new(HttpEventSource::new(format!("http://{addr}"))));
    let completion = coordinator.fetch(ticket(0)).await;

    assert!(matches!(completion.result, Err(FetchError::Transport(_))));
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let source = HttpEventSource::new("http://localhost:8000/api/");
    assert_eq!(source.base_url(), "http://localhost:8000/api");
}
