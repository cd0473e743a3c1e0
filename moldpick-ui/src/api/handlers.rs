//! Request handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use moldpick_common::events::SelectorEvent;
use moldpick_common::model::Mold;
use serde::Serialize;
use serde_json::{json, Value};

use crate::controller::DecideOutcome;
use crate::filter::FilterConfig;
use crate::AppState;

/// GET /health
///
/// Module identification; no authentication, safe for probes.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "module": "moldpick-ui",
        "version": env!("CARGO_PKG_VERSION"),
        "build": {
            "git_hash": env!("GIT_HASH"),
            "timestamp": env!("BUILD_TIMESTAMP"),
            "profile": env!("BUILD_PROFILE"),
        },
    }))
}

/// Catalog row as presented on the API (English field names; the
/// Japanese wire names stay between the store client and the catalog)
#[derive(Debug, Serialize)]
pub struct MoldView {
    pub id: i64,
    pub manufacturer: String,
    pub product_name: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl From<&Mold> for MoldView {
    fn from(mold: &Mold) -> Self {
        Self {
            id: mold.id,
            manufacturer: mold.manufacturer.clone(),
            product_name: mold.product_name.clone(),
            image_url: mold.image_url.clone(),
            category: mold.category.clone(),
        }
    }
}

/// Response for GET /api/selection
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// Currently displayed pick, if any
    pub mold: Option<MoldView>,
    /// Message from the last failed decide, if any
    pub error_message: Option<String>,
    /// True once any decide has succeeded
    pub decided: bool,
    /// Trigger button label for the UI shell
    pub button_label: String,
    /// Image version token, bumped on every successful pick
    pub image_version: u64,
}

/// GET /api/selection
pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let mold = state.shared.get_selection().await;
    Json(SelectionResponse {
        mold: mold.as_ref().map(MoldView::from),
        error_message: state.shared.get_error_message().await,
        decided: state.shared.is_decided(),
        button_label: state.shared.button_label().to_string(),
        image_version: state.shared.image_version(),
    })
}

/// GET /api/filter
pub async fn get_filter(State(state): State<AppState>) -> Json<FilterConfig> {
    Json(state.shared.get_filter().await)
}

/// PUT /api/filter
///
/// Replaces the whole filter configuration; omitted dimensions fall back
/// to `none`.
pub async fn put_filter(
    State(state): State<AppState>,
    Json(filter): Json<FilterConfig>,
) -> Json<FilterConfig> {
    state.shared.set_filter(filter).await;
    state.shared.broadcast_event(SelectorEvent::filter_changed(
        filter.shaker.as_str(),
        filter.dual.as_str(),
    ));
    Json(filter)
}

/// Response for POST /api/decide
#[derive(Debug, Serialize)]
pub struct DecideResponse {
    /// Outcome tag: selected, no_data, no_match, store_error, busy,
    /// cancelled
    pub outcome: &'static str,
    /// The new pick, present for `selected` only
    pub mold: Option<MoldView>,
    /// User-facing message for unsuccessful outcomes
    pub message: Option<String>,
    /// Trigger button label after this cycle
    pub button_label: String,
}

/// POST /api/decide
///
/// Runs one decide cycle. Unsuccessful cycles (empty catalog, no filter
/// match, store error) are recoverable states and still answer 200; only
/// a decide while one is already in flight is rejected, with 409.
pub async fn decide(State(state): State<AppState>) -> (StatusCode, Json<DecideResponse>) {
    let outcome = state.controller.decide().await;
    let button_label = state.shared.button_label().to_string();

    let (status, outcome_tag, mold, message) = match outcome {
        DecideOutcome::Selected(mold) => (
            StatusCode::OK,
            "selected",
            Some(MoldView::from(&mold)),
            None,
        ),
        DecideOutcome::NoData => (
            StatusCode::OK,
            "no_data",
            None,
            state.shared.get_error_message().await,
        ),
        DecideOutcome::NoMatch => (
            StatusCode::OK,
            "no_match",
            None,
            state.shared.get_error_message().await,
        ),
        DecideOutcome::StoreFailed(message) => {
            (StatusCode::OK, "store_error", None, Some(message))
        }
        DecideOutcome::Busy => (
            StatusCode::CONFLICT,
            "busy",
            None,
            Some("a selection is already in progress".to_string()),
        ),
        DecideOutcome::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            "cancelled",
            None,
            Some("shutting down".to_string()),
        ),
    };

    (
        status,
        Json(DecideResponse {
            outcome: outcome_tag,
            mold,
            message,
            button_label,
        }),
    )
}

/// POST /api/image/loaded
///
/// The UI shell reports that the displayed image finished loading; plays
/// the image fade-in and streams its frames over SSE.
pub async fn image_loaded(State(state): State<AppState>) -> StatusCode {
    state.controller.image_loaded().await;
    StatusCode::NO_CONTENT
}
