//! # Collection Sync
//!
//! Keeps an in-memory snapshot of a persisted collection consistent with
//! the backend behind a [`lb_core::CollectionAdapter`].
//!
//! - Bootstrap-on-empty: the first initialization of an empty collection
//!   writes the seed items
//! - Full-replace saves: every write replaces the whole collection
//! - A single error slot, cleared by the next successful operation or by
//!   [`CollectionStore::clear_error`]

pub mod state;
pub mod store;
pub mod telemetry;

pub use state::{Snapshot, StoreStatus, WriteOutcome};
pub use store::CollectionStore;
pub use telemetry::StoreTelemetry;
