//! Selector event types for real-time client updates
//!
//! Broadcast over the SSE endpoint so the UI shell can mirror selection
//! and transition state without polling.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Selector event variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectorEvent {
    /// A new mold was picked and the displayed selection replaced
    SelectionChanged {
        id: i64,
        manufacturer: String,
        product_name: String,
        image_url: Option<String>,
        image_version: u64,
        timestamp: u64,
    },

    /// Content transition phase changed (fading out, fading in, idle)
    TransitionPhase {
        phase: String,
        opacity: f32,
        timestamp: u64,
    },

    /// Filter configuration replaced
    FilterChanged {
        shaker: String,
        dual: String,
        timestamp: u64,
    },

    /// A decide cycle ended without a new selection
    SelectionFailed { message: String, timestamp: u64 },

    /// Keep-alive ping
    KeepAlive { timestamp: u64 },
}

impl SelectorEvent {
    /// SSE event name for this variant
    pub fn event_name(&self) -> &'static str {
        match self {
            SelectorEvent::SelectionChanged { .. } => "selection_changed",
            SelectorEvent::TransitionPhase { .. } => "transition_phase",
            SelectorEvent::FilterChanged { .. } => "filter_changed",
            SelectorEvent::SelectionFailed { .. } => "selection_failed",
            SelectorEvent::KeepAlive { .. } => "keep_alive",
        }
    }

    /// Current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Create SelectionChanged event
    pub fn selection_changed(
        id: i64,
        manufacturer: String,
        product_name: String,
        image_url: Option<String>,
        image_version: u64,
    ) -> Self {
        Self::SelectionChanged {
            id,
            manufacturer,
            product_name,
            image_url,
            image_version,
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create TransitionPhase event
    pub fn transition_phase(phase: &str, opacity: f32) -> Self {
        Self::TransitionPhase {
            phase: phase.to_string(),
            opacity,
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create FilterChanged event
    pub fn filter_changed(shaker: &str, dual: &str) -> Self {
        Self::FilterChanged {
            shaker: shaker.to_string(),
            dual: dual.to_string(),
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create SelectionFailed event
    pub fn selection_failed(message: impl Into<String>) -> Self {
        Self::SelectionFailed {
            message: message.into(),
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create KeepAlive event
    pub fn keep_alive() -> Self {
        Self::KeepAlive {
            timestamp: Self::current_timestamp_ms(),
        }
    }
}
