//! Remote catalog store access
//!
//! The catalog lives in a remote table; this module defines the
//! capability surface the screen controller consumes and the Supabase
//! PostgREST implementation of it. The store is configured with a single
//! table name at construction.

use async_trait::async_trait;
use moldpick_common::model::Mold;
use thiserror::Error;

pub mod supabase;

pub use supabase::SupabaseStore;

/// Store access errors
///
/// Surfaced verbatim to the user as the error message of a failed decide
/// cycle; never clears the previously displayed selection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request could not be sent or timed out
    #[error("Request failed: {0}")]
    Request(String),

    /// Store answered with a non-success status
    #[error("Store returned {0}: {1}")]
    Status(u16, String),

    /// Response body did not parse as catalog rows
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Count query response carried no usable total
    #[error("Missing or invalid row count in response")]
    MissingCount,
}

/// Capability surface of the remote catalog table
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch every row of the table
    async fn fetch_all(&self) -> Result<Vec<Mold>, StoreError>;

    /// Fetch the total row count without transferring rows
    async fn fetch_count(&self) -> Result<u64, StoreError>;

    /// Fetch the rows at offsets `[start, end]` (inclusive) in the
    /// table's declared order
    ///
    /// The ordering must be stable between a count query and a range
    /// query for offset selection to address the intended row; a table
    /// mutation in between is a known race and may return fewer rows
    /// than requested or shift which row an offset names.
    async fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<Mold>, StoreError>;
}
