//! Shared selector state
//!
//! Thread-safe shared state owned by one screen controller instance and
//! read by the HTTP handlers. The selection result is replaced wholesale
//! on each successful decide, never merged.

use moldpick_common::events::SelectorEvent;
use moldpick_common::model::Mold;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};

use crate::filter::FilterConfig;

/// Button label shown before the first successful pick
pub const LABEL_CONFIRM: &str = "OK";
/// Button label shown once a pick has ever been produced
pub const LABEL_CHANGE: &str = "変更する";

/// Shared state accessible by the controller and all HTTP handlers
///
/// Uses RwLock for concurrent read access with rare writes.
pub struct SharedState {
    /// Currently displayed pick (None until the first success)
    pub selection: RwLock<Option<Mold>>,

    /// Human-readable message from the last failed decide, cleared at
    /// the start of every cycle
    pub error_message: RwLock<Option<String>>,

    /// Current filter configuration
    pub filter: RwLock<FilterConfig>,

    /// True once any decide has succeeded; never reverts
    pub decided: AtomicBool,

    /// Image version token, bumped on every successful pick
    pub image_version: AtomicU64,

    /// True while a decide cycle is running (re-triggers are ignored)
    pub decide_in_flight: AtomicBool,

    /// Event broadcaster for SSE clients
    pub event_tx: broadcast::Sender<SelectorEvent>,
}

impl SharedState {
    /// Create new shared state with default values
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100); // Buffer up to 100 events
        Self {
            selection: RwLock::new(None),
            error_message: RwLock::new(None),
            filter: RwLock::new(FilterConfig::default()),
            decided: AtomicBool::new(false),
            image_version: AtomicU64::new(0),
            decide_in_flight: AtomicBool::new(false),
            event_tx,
        }
    }

    /// Broadcast an event to all SSE listeners
    pub fn broadcast_event(&self, event: SelectorEvent) {
        // Ignore send errors (no receivers is OK)
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<SelectorEvent> {
        self.event_tx.subscribe()
    }

    /// Number of connected SSE clients
    pub fn event_client_count(&self) -> usize {
        self.event_tx.receiver_count()
    }

    /// Get the currently displayed pick
    pub async fn get_selection(&self) -> Option<Mold> {
        self.selection.read().await.clone()
    }

    /// Replace the displayed pick
    pub async fn set_selection(&self, mold: Option<Mold>) {
        *self.selection.write().await = mold;
    }

    /// Get the last error message
    pub async fn get_error_message(&self) -> Option<String> {
        self.error_message.read().await.clone()
    }

    /// Set or clear the error message
    pub async fn set_error_message(&self, message: Option<String>) {
        *self.error_message.write().await = message;
    }

    /// Get the filter configuration
    pub async fn get_filter(&self) -> FilterConfig {
        *self.filter.read().await
    }

    /// Replace the filter configuration
    pub async fn set_filter(&self, filter: FilterConfig) {
        *self.filter.write().await = filter;
    }

    /// Current image version token
    pub fn image_version(&self) -> u64 {
        self.image_version.load(Ordering::Relaxed)
    }

    /// Bump and return the image version token
    pub fn bump_image_version(&self) -> u64 {
        self.image_version.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// True once any decide has succeeded
    pub fn is_decided(&self) -> bool {
        self.decided.load(Ordering::Relaxed)
    }

    /// Button label reflecting whether a result has ever been produced
    pub fn button_label(&self) -> &'static str {
        if self.is_decided() {
            LABEL_CHANGE
        } else {
            LABEL_CONFIRM
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
