//! Shared test helpers: scripted catalog stores and row builders

// Each integration test binary uses a different subset of the helpers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use moldpick_common::model::Mold;
use moldpick_ui::store::{CatalogStore, StoreError};
use tokio::sync::{Mutex, Notify};

/// Build a catalog row for tests
pub fn mold(id: i64, manufacturer: &str, product: &str, category: Option<&str>) -> Mold {
    Mold {
        id,
        manufacturer: manufacturer.to_string(),
        product_name: product.to_string(),
        image_url: Some(format!("https://img.example/{id}.png")),
        category: category.map(str::to_string),
    }
}

/// Build a catalog row without an image URL
pub fn mold_no_image(id: i64, manufacturer: &str, product: &str, category: Option<&str>) -> Mold {
    Mold {
        image_url: None,
        ..mold(id, manufacturer, product, category)
    }
}

/// Scripted store: each fetch pops the next queued response
///
/// An unscripted call panics so tests fail loudly on unexpected store
/// traffic.
pub struct MockStore {
    all_responses: Mutex<VecDeque<Result<Vec<Mold>, StoreError>>>,
    count_responses: Mutex<VecDeque<Result<u64, StoreError>>>,
    range_responses: Mutex<VecDeque<Result<Vec<Mold>, StoreError>>>,
    pub fetch_all_calls: AtomicUsize,
    pub fetch_count_calls: AtomicUsize,
    pub fetch_range_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            all_responses: Mutex::new(VecDeque::new()),
            count_responses: Mutex::new(VecDeque::new()),
            range_responses: Mutex::new(VecDeque::new()),
            fetch_all_calls: AtomicUsize::new(0),
            fetch_count_calls: AtomicUsize::new(0),
            fetch_range_calls: AtomicUsize::new(0),
        })
    }

    pub async fn script_all(&self, response: Result<Vec<Mold>, StoreError>) {
        self.all_responses.lock().await.push_back(response);
    }

    pub async fn script_count(&self, response: Result<u64, StoreError>) {
        self.count_responses.lock().await.push_back(response);
    }

    pub async fn script_range(&self, response: Result<Vec<Mold>, StoreError>) {
        self.range_responses.lock().await.push_back(response);
    }
}

#[async_trait]
impl CatalogStore for MockStore {
    async fn fetch_all(&self) -> Result<Vec<Mold>, StoreError> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        self.all_responses
            .lock()
            .await
            .pop_front()
            .expect("unexpected fetch_all call")
    }

    async fn fetch_count(&self) -> Result<u64, StoreError> {
        self.fetch_count_calls.fetch_add(1, Ordering::SeqCst);
        self.count_responses
            .lock()
            .await
            .pop_front()
            .expect("unexpected fetch_count call")
    }

    async fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<Mold>, StoreError> {
        assert!(start <= end, "inverted range {start}-{end}");
        self.fetch_range_calls.fetch_add(1, Ordering::SeqCst);
        self.range_responses
            .lock()
            .await
            .pop_front()
            .expect("unexpected fetch_range call")
    }
}

/// Store whose fetches block until released, for in-flight guard tests
pub struct BlockingStore {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
    rows: Vec<Mold>,
}

impl BlockingStore {
    pub fn new(rows: Vec<Mold>) -> Arc<Self> {
        Arc::new(Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            rows,
        })
    }
}

#[async_trait]
impl CatalogStore for BlockingStore {
    async fn fetch_all(&self) -> Result<Vec<Mold>, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.rows.clone())
    }

    async fn fetch_count(&self) -> Result<u64, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.rows.len() as u64)
    }

    async fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<Mold>, StoreError> {
        let start = start as usize;
        let end = (end as usize).min(self.rows.len().saturating_sub(1));
        if start >= self.rows.len() {
            return Ok(Vec::new());
        }
        Ok(self.rows[start..=end].to_vec())
    }
}
