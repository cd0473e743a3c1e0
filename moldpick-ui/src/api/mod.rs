//! HTTP API for the mold selector screen
//!
//! The UI shell drives the screen controller through this surface:
//! decide, read/replace the filter, poll the selection, and follow the
//! SSE event stream for transition frames.

mod handlers;
mod sse;

pub use handlers::{
    decide, get_filter, get_selection, health, image_loaded, put_filter, DecideResponse,
    MoldView, SelectionResponse,
};
pub use sse::events;
