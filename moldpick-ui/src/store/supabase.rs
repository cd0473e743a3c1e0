//! Supabase (PostgREST) catalog store client
//!
//! Talks to the table REST endpoint at `{endpoint}/rest/v1/{table}`.
//! Row counts use the PostgREST `Prefer: count=exact` header and come
//! back in the `Content-Range` header; range fetches use `Range-Unit:
//! items` with an explicit order on the sequence-number column so
//! offsets address a stable row order.

use async_trait::async_trait;
use moldpick_common::model::Mold;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE, RANGE};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

use super::{CatalogStore, StoreError};

const USER_AGENT: &str = concat!("moldpick/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stable order applied to count and range queries (sequence-number
/// column, ascending)
const ORDER: &str = "番号.asc";

/// Supabase PostgREST client for one catalog table
pub struct SupabaseStore {
    http_client: reqwest::Client,
    table_url: Url,
    table: String,
}

impl SupabaseStore {
    /// Create a client for `table` behind the given endpoint
    pub fn new(endpoint_url: &str, api_key: &str, table: &str) -> Result<Self, StoreError> {
        let mut table_url = Url::parse(endpoint_url)
            .map_err(|e| StoreError::Request(format!("invalid endpoint URL: {}", e)))?;
        table_url
            .path_segments_mut()
            .map_err(|_| StoreError::Request("endpoint URL cannot be a base".to_string()))?
            .extend(["rest", "v1", table]);

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|_| StoreError::Request("API key contains invalid characters".to_string()))?;
        headers.insert("apikey", key_value);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| StoreError::Request("API key contains invalid characters".to_string()))?;
        headers.insert("Authorization", bearer);

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        Ok(Self {
            http_client,
            table_url,
            table: table.to_string(),
        })
    }

    /// Map a non-success response to a StoreError with the body attached
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body.trim().to_string()
        };
        Err(StoreError::Status(status.as_u16(), detail))
    }
}

#[async_trait]
impl CatalogStore for SupabaseStore {
    async fn fetch_all(&self) -> Result<Vec<Mold>, StoreError> {
        debug!(table = %self.table, "fetching full catalog snapshot");

        let response = self
            .http_client
            .get(self.table_url.clone())
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let response = Self::check(response).await?;
        let rows: Vec<Mold> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        info!(table = %self.table, rows = rows.len(), "fetched catalog snapshot");
        Ok(rows)
    }

    async fn fetch_count(&self) -> Result<u64, StoreError> {
        debug!(table = %self.table, "fetching row count");

        let response = self
            .http_client
            .get(self.table_url.clone())
            .query(&[("select", "*")])
            .header("Range-Unit", "items")
            .header(RANGE, "0-0")
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        // An empty table may answer the 0-0 probe with 416; its
        // Content-Range header still carries the total (`*/0`).
        let response = if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            response
        } else {
            Self::check(response).await?
        };
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or(StoreError::MissingCount)?;

        let count = parse_content_range_total(content_range).ok_or(StoreError::MissingCount)?;
        debug!(table = %self.table, count, "row count");
        Ok(count)
    }

    async fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<Mold>, StoreError> {
        debug!(table = %self.table, start, end, "fetching row range");

        let response = self
            .http_client
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("order", ORDER)])
            .header("Range-Unit", "items")
            .header(RANGE, format!("{}-{}", start, end))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        // PostgREST answers an unsatisfiable range (offset past the end
        // of a table that shrank since the count query) with 416; the
        // caller treats the empty result as an empty dataset.
        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(Vec::new());
        }

        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

/// Extract the total from a `Content-Range` value such as `0-0/57`
///
/// PostgREST reports an empty table as `*/0`; a `*` total (count not
/// computed) yields None.
fn parse_content_range_total(value: &str) -> Option<u64> {
    let total = value.rsplit('/').next()?;
    if total == "*" {
        return None;
    }
    total.trim().parse().ok()
}
