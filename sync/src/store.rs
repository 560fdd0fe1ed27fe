//! The synchronized collection store.
//!
//! A [`CollectionStore`] keeps a complete in-memory snapshot of one
//! persisted collection. [`CollectionStore::initialize`] reconciles with the
//! adapter, seeding the collection on first run; [`CollectionStore::write`]
//! replaces the whole collection and, on success, the snapshot.
//!
//! Adapter round-trips are serialized through a FIFO lock that also holds
//! the operation sequence. A sequence number is drawn only once the lock is
//! held, so commits reach the adapter in issue order and the snapshot always
//! reflects the last commit.

use crate::state::{Snapshot, StoreState, WriteOutcome};
use crate::telemetry::{Outcome, StoreTelemetry};
use errors::{FailureKind, NormalizationError, StoreFailure};
use lb_core::{CollectionAdapter, Item, normalize_records, records_for};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct CollectionStore {
    adapter: Arc<dyn CollectionAdapter>,
    collection: String,
    seed: Vec<Item>,
    state: RwLock<StoreState>,
    round_trip: Mutex<u64>,
    telemetry: StoreTelemetry
}

impl CollectionStore {
    /// Creates an uninitialized store. `seed` is written only when the
    /// collection turns out to be empty.
    pub fn new(
        adapter: Arc<dyn CollectionAdapter>,
        collection: impl Into<String>,
        seed: Vec<Item>
    ) -> Self {
        let collection = collection.into();
        Self {
            adapter,
            telemetry: StoreTelemetry::new(collection.clone(), true),
            collection,
            seed,
            state: RwLock::new(StoreState::default()),
            round_trip: Mutex::new(0)
        }
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.telemetry = StoreTelemetry::new(self.collection.clone(), enabled);
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn backend(&self) -> &'static str {
        self.adapter.name()
    }

    pub fn read(&self) -> Snapshot {
        self.state.read().snapshot()
    }

    /// Loads the collection, seeding it if empty.
    ///
    /// Safe to call again: a populated collection is only re-read. Failures
    /// land in the snapshot's `error`.
    pub async fn initialize(&self) {
        let _flight = InFlight::enter(&self.state);
        let mut sequence = self.round_trip.lock().await;
        *sequence += 1;
        let revision = *sequence;

        debug!(collection = %self.collection, revision, "Initializing collection store");
        let result = self.reconcile().await;

        let mut state = self.state.write();
        match result {
            Ok((items, outcome)) => {
                info!(
                    collection = %self.collection,
                    backend = self.adapter.name(),
                    count = items.len(),
                    outcome = outcome.as_str(),
                    "Collection store initialized"
                );
                self.telemetry.record_initialize(outcome);
                state.apply_data(revision, items);
            }
            Err(failure) => {
                warn!(
                    collection = %self.collection,
                    kind = %failure.kind,
                    error = %failure.message,
                    "Collection store initialization failed"
                );
                self.telemetry.record_initialize(Outcome::Failed);
                state.apply_failure(revision, failure);
            }
        }
    }

    async fn reconcile(&self) -> Result<(Vec<Item>, Outcome), StoreFailure> {
        let records = self
            .adapter
            .list_all(&self.collection)
            .await
            .map_err(|e| StoreFailure::from_adapter(&e, FailureKind::Fetch))?;

        if !records.is_empty() {
            return Ok((normalize_records(records)?, Outcome::Loaded));
        }

        let seed = normalize_items(&self.seed)?;
        if seed.is_empty() {
            debug!(collection = %self.collection, "Collection empty and no seed configured");
            return Ok((seed, Outcome::Loaded));
        }

        info!(
            collection = %self.collection,
            count = seed.len(),
            "Collection empty, writing seed items"
        );
        self.adapter
            .replace_all(&self.collection, &seed)
            .await
            .map_err(|e| StoreFailure::from_adapter(&e, FailureKind::Write))?;
        Ok((seed, Outcome::Seeded))
    }

    /// Replaces the whole collection with `items`.
    ///
    /// On failure the snapshot keeps its previous data and `error` is set.
    pub async fn write(&self, items: Vec<Item>) -> WriteOutcome {
        let _flight = InFlight::enter(&self.state);
        let mut sequence = self.round_trip.lock().await;
        self.commit(&mut sequence, items).await
    }

    async fn commit(&self, sequence: &mut u64, items: Vec<Item>) -> WriteOutcome {
        *sequence += 1;
        let revision = *sequence;
        let requested = items.len();

        let result = match normalize_items(&items) {
            Ok(normalized) => self
                .adapter
                .replace_all(&self.collection, &normalized)
                .await
                .map(|()| normalized)
                .map_err(|e| StoreFailure::from_adapter(&e, FailureKind::Write)),
            Err(e) => Err(StoreFailure::from(e))
        };

        let mut state = self.state.write();
        match result {
            Ok(normalized) => {
                let count = normalized.len();
                debug!(collection = %self.collection, count, revision, "Collection written");
                self.telemetry.record_write(Outcome::Ok, count);
                state.apply_data(revision, normalized);
                WriteOutcome::Committed { count }
            }
            Err(failure) => {
                warn!(
                    collection = %self.collection,
                    count = requested,
                    kind = %failure.kind,
                    error = %failure.message,
                    "Collection write failed"
                );
                self.telemetry.record_write(Outcome::Failed, requested);
                state.apply_failure(revision, failure.clone());
                WriteOutcome::Failed(failure)
            }
        }
    }

    /// Applies `edit` to the current data under the round-trip lock and
    /// writes the result if the edit reports a change.
    async fn edit<F>(&self, operation: &'static str, edit: F) -> WriteOutcome
    where
        F: FnOnce(&mut Vec<Item>) -> bool
    {
        let _flight = InFlight::enter(&self.state);
        let mut sequence = self.round_trip.lock().await;

        let (loaded, mut items) = {
            let state = self.state.read();
            (state.loaded, state.data.to_vec())
        };
        if !loaded {
            warn!(
                collection = %self.collection,
                operation,
                "Collection not loaded, refusing edit"
            );
            self.telemetry.record_write(Outcome::Unchanged, items.len());
            return WriteOutcome::Unchanged;
        }
        if !edit(&mut items) {
            debug!(collection = %self.collection, operation, "Edit matched nothing");
            self.telemetry.record_write(Outcome::Unchanged, items.len());
            return WriteOutcome::Unchanged;
        }

        self.commit(&mut sequence, items).await
    }

    /// Adds `item` at the end. An id already present is left alone.
    pub async fn append(&self, item: Item) -> WriteOutcome {
        self.edit("append", |items| {
            if items.iter().any(|existing| existing.id == item.id) {
                return false;
            }
            items.push(item);
            true
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> WriteOutcome {
        self.edit("remove", |items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            items.len() != before
        })
        .await
    }

    /// Replaces the item with the same id, keeping its position.
    pub async fn update(&self, item: Item) -> WriteOutcome {
        self.edit("update", |items| {
            match items.iter_mut().find(|existing| existing.id == item.id) {
                Some(slot) => {
                    *slot = item;
                    true
                }
                None => false
            }
        })
        .await
    }

    /// Sets `lastRefreshed` on one item.
    pub async fn touch_refreshed(&self, id: &str, timestamp: impl Into<String>) -> WriteOutcome {
        let timestamp = timestamp.into();
        self.edit("touch_refreshed", |items| {
            match items.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.last_refreshed = Some(timestamp);
                    true
                }
                None => false
            }
        })
        .await
    }

    /// Dismisses the current error. Returns whether there was one.
    pub fn clear_error(&self) -> bool {
        let cleared = self.state.write().clear_error();
        if cleared {
            debug!(collection = %self.collection, "Store error cleared");
        }
        cleared
    }
}

/// Normalizes items exactly as they would read back from storage.
fn normalize_items(items: &[Item]) -> Result<Vec<Item>, NormalizationError> {
    normalize_records(records_for(items))
}

/// Marks one operation in flight for as long as it lives.
struct InFlight<'a>(&'a RwLock<StoreState>);

impl<'a> InFlight<'a> {
    fn enter(state: &'a RwLock<StoreState>) -> Self {
        state.write().in_flight += 1;
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.0.write();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}
