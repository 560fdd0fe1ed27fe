use lb_core::{Item, RawRecord};
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

pub fn unique_collection() -> String {
    unique_id("test-collection")
}

/// Three items covering a grouped item, an ungrouped one and a stamped one.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::placeholder("1", "Weekly Sales Report").with_group("Sales Reports"),
        Item::new(
            "2",
            "Customer Churn Analysis",
            "https://reports.example.com/churn.xlsx",
            "https://reports.example.com/churn/refresh"
        ),
        Item::placeholder("3", "Ad Campaign Performance")
            .with_group("Marketing")
            .with_last_refreshed("2024-06-01T09:30:00.000Z"),
    ]
}

pub fn default_seed() -> Vec<Item> {
    lb_core::default_items()
}

/// A raw record from a JSON object literal.
pub fn raw_record(id: &str, body: Value) -> RawRecord {
    match body {
        Value::Object(fields) => RawRecord::new(id, fields),
        other => panic!("record body must be a JSON object, got {other}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unique_id_generation() {
        let id1 = unique_id("test");
        let id2 = unique_id("test");
        assert_ne!(id1, id2);
        assert!(id1.starts_with("test-"));
        assert!(unique_collection().starts_with("test-collection-"));
    }

    #[test]
    fn test_sample_items_have_unique_ids() {
        let items = sample_items();
        let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
        assert_eq!(default_seed().len(), 16);
    }

    #[test]
    fn test_raw_record_from_json() {
        let record = raw_record("7", json!({"title": "T"}));
        assert_eq!(record.id, "7");
        assert_eq!(record.text("title").as_deref(), Some("T"));
    }
}
