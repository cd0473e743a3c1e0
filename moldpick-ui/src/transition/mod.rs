//! Transition state machines
//!
//! Two independent fade mechanisms, both modeled as typed state machines
//! advanced by elapsed time rather than tied to any animation primitive:
//!
//! - [`ContentTransition`]: the two-segment fade (out, swap, in) played
//!   once per decide action around the content replacement;
//! - [`ImageFade`]: the per-image fade-in restarted on every image load,
//!   with an `animate` flag that pins opacity when suppressed.
//!
//! A tokio interval in the controller drives both and broadcasts opacity
//! frames over SSE.

mod content;
mod image;

pub use content::{ContentTransition, Phase, Step};
pub use image::ImageFade;
