use errors::StoreFailure;
use lb_core::Item;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};

/// Lifecycle of a store.
///
/// `Loading` is reported whenever an operation is in flight or queued; the
/// other three are the settled states.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoreStatus {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Errored
}

/// A complete, immutable view of the store at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub data: Arc<[Item]>,
    pub loading: bool,
    pub error: Option<StoreFailure>,
    pub status: StoreStatus,

    /// Sequence number of the last operation applied; 0 before any.
    pub revision: u64
}

impl Snapshot {
    pub fn items(&self) -> &[Item] {
        &self.data
    }

    pub fn find(&self, id: &str) -> Option<&Item> {
        self.data.iter().find(|item| item.id == id)
    }
}

/// Result of a `write` or one of the edit helpers built on it.
///
/// A failure is also left in the store's `error` slot; the outcome only
/// saves callers a second `read()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Committed { count: usize },
    Failed(StoreFailure),

    /// The edit did not apply to the current data; no adapter call was made.
    Unchanged
}

impl WriteOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, WriteOutcome::Committed { .. })
    }

    pub fn failure(&self) -> Option<&StoreFailure> {
        match self {
            WriteOutcome::Failed(failure) => Some(failure),
            _ => None
        }
    }
}

/// Mutable state behind the store's lock.
#[derive(Debug)]
pub(crate) struct StoreState {
    pub data: Arc<[Item]>,
    pub error: Option<StoreFailure>,
    pub settled: StoreStatus,
    pub in_flight: usize,
    pub revision: u64,
    pub loaded: bool
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            data: Arc::from(Vec::new()),
            error: None,
            settled: StoreStatus::Uninitialized,
            in_flight: 0,
            revision: 0,
            loaded: false
        }
    }
}

impl StoreState {
    pub fn snapshot(&self) -> Snapshot {
        let loading = self.in_flight > 0;
        Snapshot {
            data: Arc::clone(&self.data),
            loading,
            error: self.error.clone(),
            status: if loading {
                StoreStatus::Loading
            } else {
                self.settled
            },
            revision: self.revision
        }
    }

    pub fn apply_data(&mut self, revision: u64, items: Vec<Item>) {
        self.data = Arc::from(items);
        self.error = None;
        self.settled = StoreStatus::Ready;
        self.loaded = true;
        self.revision = revision;
    }

    pub fn apply_failure(&mut self, revision: u64, failure: StoreFailure) {
        self.error = Some(failure);
        self.settled = StoreStatus::Errored;
        self.revision = revision;
    }

    pub fn clear_error(&mut self) -> bool {
        if self.error.take().is_none() {
            return false;
        }
        self.settled = if self.loaded {
            StoreStatus::Ready
        } else {
            StoreStatus::Uninitialized
        };
        true
    }
}
