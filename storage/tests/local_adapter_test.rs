use errors::AdapterError;
use lb_core::{CollectionAdapter, Item, RawRecord};
use serde_json::Value;
use storage::LocalFileAdapter;
use tempfile::tempdir;

fn items(records: Vec<RawRecord>) -> Vec<Item> {
    records.into_iter().map(RawRecord::into_item).collect()
}

#[tokio::test]
async fn test_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let adapter = LocalFileAdapter::new(dir.path().join("collections.json"));

    let listed = adapter.list_all("downloadItems").await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_replace_creates_parent_dirs_and_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("collections.json");
    let adapter = LocalFileAdapter::new(&path);

    let written = vec![
        Item::placeholder("1", "Weekly Sales Report").with_group("Sales Reports"),
        Item::new("2", "Churn", "https://example.com/churn.xlsx", "#")
            .with_last_refreshed("2024-06-01T09:30:00.000Z"),
    ];
    adapter.replace_all("downloadItems", &written).await.unwrap();

    assert!(path.exists());
    let reopened = LocalFileAdapter::new(&path);
    assert_eq!(
        items(reopened.list_all("downloadItems").await.unwrap()),
        written
    );
}

#[tokio::test]
async fn test_replace_only_touches_its_collection() {
    let dir = tempdir().unwrap();
    let adapter = LocalFileAdapter::new(dir.path().join("collections.json"));

    adapter
        .replace_all("downloadItems", &[Item::placeholder("1", "A")])
        .await
        .unwrap();
    adapter
        .replace_all("specialDownloadItems", &[Item::placeholder("9", "Z")])
        .await
        .unwrap();
    adapter.replace_all("downloadItems", &[]).await.unwrap();

    assert!(adapter.list_all("downloadItems").await.unwrap().is_empty());
    assert_eq!(
        adapter.list_all("specialDownloadItems").await.unwrap()[0].id,
        "9"
    );
}

#[tokio::test]
async fn test_stored_body_omits_absent_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collections.json");
    let adapter = LocalFileAdapter::new(&path);

    let mut item = Item::placeholder("1", "A");
    item.last_refreshed = Some(String::new());
    adapter.replace_all("downloadItems", &[item]).await.unwrap();

    let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let entry = &raw["collections"]["downloadItems"][0];
    assert_eq!(entry["id"], "1");
    assert!(entry.get("lastRefreshed").is_none());
    assert!(entry.get("group").is_none());
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_corrupt_file_fails_fetch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collections.json");
    std::fs::write(&path, "{ not json").unwrap();
    let adapter = LocalFileAdapter::new(&path);

    let err = adapter.list_all("downloadItems").await.unwrap_err();
    assert!(matches!(err, AdapterError::Fetch { .. }));

    let err = adapter.replace_all("downloadItems", &[]).await.unwrap_err();
    assert!(matches!(err, AdapterError::Write { .. }));
}

#[tokio::test]
async fn test_entries_without_id_are_listed_for_normalization() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collections.json");
    std::fs::write(
        &path,
        r#"{"collections": {"downloadItems": [{"title": "orphan"}]}}"#
    )
    .unwrap();

    let listed = LocalFileAdapter::new(&path)
        .list_all("downloadItems")
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "");
    assert_eq!(listed[0].text("title").as_deref(), Some("orphan"));
}
