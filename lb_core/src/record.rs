//! Adapter-neutral stored documents and their normalization into items.

use crate::item::Item;
use errors::NormalizationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One stored document as an adapter returns it: an id plus an untyped body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,

    #[serde(default)]
    pub fields: Map<String, Value>
}

impl RawRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields
        }
    }

    /// Text value of a body field.
    ///
    /// Strings pass through; numbers and booleans are rendered; null,
    /// arrays, objects and missing fields yield `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None
        }
    }

    /// Builds an item, defaulting every missing field instead of failing.
    pub fn into_item(self) -> Item {
        let last_refreshed = self.text("lastRefreshed").filter(|s| !s.is_empty());
        Item {
            title: self.text("title").unwrap_or_default(),
            download_url: self.text("downloadUrl").unwrap_or_default(),
            refresh_url: self.text("refreshUrl").unwrap_or_default(),
            group: self.text("group").unwrap_or_default(),
            last_refreshed,
            id: self.id
        }
    }
}

/// Normalizes a listed collection into items, preserving order.
///
/// Only records without a usable identity fail: an empty id, or an id seen
/// twice. Everything else degrades to defaulted fields.
pub fn normalize_records(records: Vec<RawRecord>) -> Result<Vec<Item>, NormalizationError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(NormalizationError::EmptyId { index });
        }
        if !seen.insert(record.id.clone()) {
            return Err(NormalizationError::DuplicateId { id: record.id });
        }
        items.push(record.into_item());
    }

    Ok(items)
}
