//! moldpick-ui library - mold selector service
//!
//! Serves the mold selector screen's backend: random selection from a
//! remote Supabase catalog with category filters, and the content and
//! image fade transitions streamed to the UI shell over SSE.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod controller;
pub mod filter;
pub mod selector;
pub mod state;
pub mod store;
pub mod transition;

pub use controller::ScreenController;
pub use state::SharedState;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Selection, filter, and event-stream state
    pub shared: Arc<SharedState>,
    /// Decide-cycle orchestrator
    pub controller: Arc<ScreenController>,
}

impl AppState {
    /// Create new application state
    pub fn new(shared: Arc<SharedState>, controller: Arc<ScreenController>) -> Self {
        Self { shared, controller }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/health", get(api::health))
        .route("/api/selection", get(api::get_selection))
        .route("/api/filter", get(api::get_filter).put(api::put_filter))
        .route("/api/decide", post(api::decide))
        .route("/api/image/loaded", post(api::image_loaded))
        .route("/api/events", get(api::events))
        .layer(TraceLayer::new_for_http())
        // Local UI shell access from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
