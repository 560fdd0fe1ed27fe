//! Persisted document bodies.
//!
//! A stored document is keyed by the item id; its body holds every other
//! field. Optional fields without a value are left out of the body entirely,
//! since document stores reject explicit null values in write payloads.

use crate::item::Item;
use crate::record::RawRecord;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentBody(Map<String, Value>);

impl DocumentBody {
    /// Builds the body for `item`, stripping absent optional fields.
    pub fn from_item(item: &Item) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(item.title.clone()));
        fields.insert(
            "downloadUrl".to_string(),
            Value::String(item.download_url.clone())
        );
        fields.insert(
            "refreshUrl".to_string(),
            Value::String(item.refresh_url.clone())
        );
        if !item.group.is_empty() {
            fields.insert("group".to_string(), Value::String(item.group.clone()));
        }
        if let Some(stamp) = item
            .last_refreshed
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            fields.insert("lastRefreshed".to_string(), Value::String(stamp.to_string()));
        }
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Pairs the body with the item id as a stored record.
    pub fn into_record(self, id: impl Into<String>) -> RawRecord {
        RawRecord::new(id, self.0)
    }
}

/// Stored records for a whole collection, in order.
pub fn records_for(items: &[Item]) -> Vec<RawRecord> {
    items
        .iter()
        .map(|item| DocumentBody::from_item(item).into_record(item.id.clone()))
        .collect()
}
