//! Server-Sent Events stream for real-time client updates
//!
//! Streams selector events:
//! - SelectionChanged (a new pick is displayed)
//! - TransitionPhase (content and image fade frames)
//! - FilterChanged (filter configuration replaced)
//! - SelectionFailed (a decide cycle failed)

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

use crate::AppState;

/// GET /api/events
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(
        "new SSE client connected, total clients: {}",
        state.shared.event_client_count()
    );

    let rx = state.shared.subscribe_events();
    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(selector_event) => Event::default()
                .event(selector_event.event_name())
                .json_data(&selector_event)
                .ok()
                .map(Ok),
            Err(e) => {
                // Lagged receiver; log and keep the connection alive
                warn!("SSE client error: {:?}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keep-alive"),
    )
}
