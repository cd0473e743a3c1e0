//! Catalog data model
//!
//! One `Mold` is one row of the remote catalog table. The table predates
//! this service and uses Japanese column names on the wire; the serde
//! renames below map them to the field names used everywhere else.

use serde::{Deserialize, Serialize};

/// Default catalog table name on the remote store
pub const DEFAULT_TABLE: &str = "Silicone mold";

/// Category label for shaker molds
pub const CATEGORY_SHAKER: &str = "シェイカー";

/// Category label for dual-resin molds
pub const CATEGORY_DUAL_RESIN: &str = "2液性レジン";

/// Sentinel category assigned to rows whose category column is NULL
pub const EMPTY_CATEGORY: &str = "EMPTY";

/// One catalog entry
///
/// Rows are immutable once fetched: a decide cycle works on the snapshot
/// taken at that moment and never merges in later updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mold {
    /// Unique stable identifier (the catalog's sequence number column)
    #[serde(rename = "番号")]
    pub id: i64,

    /// Display name of the producer
    #[serde(rename = "メーカー")]
    pub manufacturer: String,

    /// Display name of the product
    #[serde(rename = "商品名")]
    pub product_name: String,

    /// Image URL, absent for rows without a photo
    #[serde(rename = "画像URL", default)]
    pub image_url: Option<String>,

    /// Category label (one of the fixed vocabulary), absent for
    /// uncategorized rows
    #[serde(rename = "種類", default)]
    pub category: Option<String>,
}

impl Mold {
    /// Effective category used by the filter: the row's category, or
    /// [`EMPTY_CATEGORY`] when the column is NULL or blank.
    pub fn effective_category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => EMPTY_CATEGORY,
        }
    }
}
