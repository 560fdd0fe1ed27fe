//! Process-local collections.

use async_trait::async_trait;
use errors::AdapterError;
use lb_core::document::records_for;
use lb_core::{CollectionAdapter, Item, RawRecord};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Collections held in memory and lost when the process exits.
///
/// Records are stored in the same stripped shape the other backends
/// persist, so tests can inspect exactly what a write would have sent.
/// `fail_next_list` / `fail_next_replace` make the next call fail once.
#[derive(Default)]
pub struct InMemoryAdapter {
    collections: RwLock<HashMap<String, Vec<RawRecord>>>,
    faults: Mutex<Faults>
}

#[derive(Default)]
struct Faults {
    list: Option<String>,
    replace: Option<String>,
    replace_calls: usize
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter whose `collection` already holds `items`.
    pub fn with_items(collection: &str, items: &[Item]) -> Self {
        let mut collections = HashMap::new();
        collections.insert(collection.to_string(), records_for(items));
        Self {
            collections: RwLock::new(collections),
            faults: Mutex::default()
        }
    }

    /// Stores raw records as-is, bypassing body stripping.
    pub async fn put_records(&self, collection: &str, records: Vec<RawRecord>) {
        self.collections
            .write()
            .await
            .insert(collection.to_string(), records);
    }

    /// Records currently stored for `collection`.
    pub async fn stored_records(&self, collection: &str) -> Vec<RawRecord> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_next_list(&self, reason: impl Into<String>) {
        self.faults.lock().list = Some(reason.into());
    }

    pub fn fail_next_replace(&self, reason: impl Into<String>) {
        self.faults.lock().replace = Some(reason.into());
    }

    /// Number of `replace_all` calls seen, failed ones included.
    pub fn replace_calls(&self) -> usize {
        self.faults.lock().replace_calls
    }
}

#[async_trait]
impl CollectionAdapter for InMemoryAdapter {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<RawRecord>, AdapterError> {
        if let Some(reason) = self.faults.lock().list.take() {
            return Err(AdapterError::fetch(collection, reason));
        }
        Ok(self.stored_records(collection).await)
    }

    async fn replace_all(&self, collection: &str, items: &[Item]) -> Result<(), AdapterError> {
        let fault = {
            let mut faults = self.faults.lock();
            faults.replace_calls += 1;
            faults.replace.take()
        };
        if let Some(reason) = fault {
            return Err(AdapterError::write(collection, reason));
        }

        self.collections
            .write()
            .await
            .insert(collection.to_string(), records_for(items));
        debug!(collection, count = items.len(), "Replaced in-memory collection");
        Ok(())
    }
}
