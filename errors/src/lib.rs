//! # Linkboard Errors
//!
//! Error taxonomy shared by the collection adapters and the synchronized
//! store.
//!
//! - Uses `thiserror` for structured error definitions
//! - Adapter failures keep the collection name and a human-readable reason
//! - The store reduces every failure to a single [`StoreFailure`] slot that
//!   still carries a [`FailureKind`] tag

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Errors raised by a collection adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Failed to list collection {collection}: {reason}")]
    Fetch { collection: String, reason: String },

    #[error("Failed to replace collection {collection}: {reason}")]
    Write { collection: String, reason: String },

    #[error("{backend} connection is closed")]
    NotConnected { backend: String },

    #[error("Invalid adapter configuration: {reason}")]
    InvalidConfig { reason: String }
}

impl AdapterError {
    pub fn fetch(collection: &str, reason: impl std::fmt::Display) -> Self {
        AdapterError::Fetch {
            collection: collection.to_string(),
            reason: reason.to_string()
        }
    }

    pub fn write(collection: &str, reason: impl std::fmt::Display) -> Self {
        AdapterError::Write {
            collection: collection.to_string(),
            reason: reason.to_string()
        }
    }

    /// Failure kind this error maps to once it reaches the store.
    ///
    /// A closed connection or bad configuration surfaces as whichever
    /// operation hit it; callers pass the operation in `during`.
    pub fn kind(&self, during: FailureKind) -> FailureKind {
        match self {
            AdapterError::Fetch { .. } => FailureKind::Fetch,
            AdapterError::Write { .. } => FailureKind::Write,
            AdapterError::NotConnected { .. } | AdapterError::InvalidConfig { .. } => during
        }
    }
}

/// Raw records that cannot become items.
///
/// Missing optional fields never produce this error; they are defaulted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("Record at position {index} has no id")]
    EmptyId { index: usize },

    #[error("Duplicate id in collection: {id}")]
    DuplicateId { id: String }
}

/// Which stage of reconciliation failed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Write,
    Normalization
}

/// The store's single current-error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct StoreFailure {
    pub kind: FailureKind,
    pub message: String
}

impl StoreFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into()
        }
    }

    pub fn from_adapter(err: &AdapterError, during: FailureKind) -> Self {
        Self::new(err.kind(during), err.to_string())
    }
}

impl From<NormalizationError> for StoreFailure {
    fn from(err: NormalizationError) -> Self {
        Self::new(FailureKind::Normalization, err.to_string())
    }
}
