//! # Moldpick Common Library
//!
//! Shared code for the moldpick service including:
//! - Catalog data model (Mold rows and category labels)
//! - Error types
//! - Configuration resolution
//! - Opacity fade curve definitions and calculations
//! - Selector event types (SSE payloads)

pub mod config;
pub mod error;
pub mod events;
pub mod fade;
pub mod model;

pub use error::{Error, Result};
pub use fade::FadeCurve;
pub use model::Mold;
