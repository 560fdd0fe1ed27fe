use config::RemoteStoreConfig;
use errors::AdapterError;
use lb_core::{CollectionAdapter, Item};
use serde_json::{Value, json};
use std::sync::Arc;
use storage::{DocumentConnection, RemoteDocumentAdapter};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const COLLECTION_PATH: &str =
    "/v1/projects/hire-helper/databases/(default)/documents/downloadItems";
const COMMIT_PATH: &str = "/v1/projects/hire-helper/databases/(default)/documents:commit";
const DOC_PREFIX: &str = "projects/hire-helper/databases/(default)/documents/downloadItems";

fn adapter_for(server: &MockServer, api_key: Option<&str>) -> RemoteDocumentAdapter {
    let config = RemoteStoreConfig {
        base_url: server.uri(),
        project_id: "hire-helper".to_string(),
        api_key: api_key.map(str::to_string),
        ..RemoteStoreConfig::default()
    };
    RemoteDocumentAdapter::new(Arc::new(DocumentConnection::connect(&config).unwrap()))
}

fn document(id: &str, fields: Value) -> Value {
    json!({ "name": format!("{DOC_PREFIX}/{id}"), "fields": fields })
}

fn commit_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_list_decodes_documents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(query_param("key", "web-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("1", json!({
                    "title": {"stringValue": "Weekly Sales Report"},
                    "downloadUrl": {"stringValue": "#"},
                    "refreshUrl": {"stringValue": "#"},
                    "group": {"stringValue": "Sales Reports"}
                })),
                document("2", json!({
                    "title": {"stringValue": "Churn Analysis"},
                    "lastRefreshed": {"stringValue": "2024-06-01T09:30:00.000Z"}
                }))
            ]
        })))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server, Some("web-key"));
    let items: Vec<Item> = adapter
        .list_all("downloadItems")
        .await
        .unwrap()
        .into_iter()
        .map(lb_core::RawRecord::into_item)
        .collect();

    assert_eq!(
        items[0],
        Item::placeholder("1", "Weekly Sales Report").with_group("Sales Reports")
    );
    assert_eq!(items[1].id, "2");
    assert_eq!(items[1].download_url, "");
    assert_eq!(
        items[1].last_refreshed.as_deref(),
        Some("2024-06-01T09:30:00.000Z")
    );
}

#[tokio::test]
async fn test_empty_and_missing_collections_list_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/v1/projects/hire-helper/databases/(default)/documents/specialDownloadItems"
        ))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server, None);
    assert!(adapter.list_all("downloadItems").await.unwrap().is_empty());
    assert!(
        adapter
            .list_all("specialDownloadItems")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_list_follows_page_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("2", json!({"title": {"stringValue": "B"}}))]
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("1", json!({"title": {"stringValue": "A"}}))],
            "nextPageToken": "page-2"
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    let adapter = adapter_for(&server, None);
    let ids: Vec<String> = adapter
        .list_all("downloadItems")
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_list_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let err = adapter_for(&server, None)
        .list_all("downloadItems")
        .await
        .unwrap_err();
    match err {
        AdapterError::Fetch { collection, reason } => {
            assert_eq!(collection, "downloadItems");
            assert!(reason.contains("403"));
            assert!(reason.contains("PERMISSION_DENIED"));
        }
        other => panic!("expected fetch error, got {other:?}")
    }
}

#[tokio::test]
async fn test_replace_commits_deletes_and_stripped_updates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("1", json!({"title": {"stringValue": "old"}})),
                document("stale", json!({"title": {"stringValue": "gone"}}))
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"writeResults": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut unstamped = Item::placeholder("1", "A edited");
    unstamped.last_refreshed = Some(String::new());
    let stamped = Item::placeholder("2", "B")
        .with_group("G1")
        .with_last_refreshed("2024-06-01T09:30:00.000Z");

    adapter_for(&server, None)
        .replace_all("downloadItems", &[unstamped, stamped])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let commit = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let writes = commit_body(commit)["writes"].as_array().unwrap().clone();

    assert_eq!(writes.len(), 3);
    assert_eq!(writes[0], json!({"delete": format!("{DOC_PREFIX}/stale")}));

    let first = &writes[1]["update"];
    assert_eq!(first["name"], format!("{DOC_PREFIX}/1"));
    assert_eq!(first["fields"]["title"], json!({"stringValue": "A edited"}));
    assert!(first["fields"].get("lastRefreshed").is_none());
    assert!(first["fields"].get("group").is_none());
    assert!(first["fields"].get("id").is_none());

    let second = &writes[2]["update"]["fields"];
    assert_eq!(second["group"], json!({"stringValue": "G1"}));
    assert_eq!(
        second["lastRefreshed"],
        json!({"stringValue": "2024-06-01T09:30:00.000Z"})
    );
}

#[tokio::test]
async fn test_replace_with_empty_list_deletes_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("1", json!({})), document("2", json!({}))]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    adapter_for(&server, None)
        .replace_all("downloadItems", &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let commit = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let writes = commit_body(commit)["writes"].as_array().unwrap().clone();
    assert_eq!(writes.len(), 2);
    assert!(writes.iter().all(|w| w.get("delete").is_some()));
}

#[tokio::test]
async fn test_rejected_commit_is_write_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("INVALID_ARGUMENT"))
        .mount(&server)
        .await;

    let err = adapter_for(&server, None)
        .replace_all("downloadItems", &[Item::placeholder("1", "A")])
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::Write { .. }));
    assert!(err.to_string().contains("INVALID_ARGUMENT"));
}

#[tokio::test]
async fn test_invalid_ids_are_rejected_before_any_request() {
    let server = MockServer::start().await;

    let err = adapter_for(&server, None)
        .replace_all("downloadItems", &[Item::placeholder("a/b", "A")])
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::Write { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_connection_refuses_calls() {
    let server = MockServer::start().await;
    let adapter = adapter_for(&server, None);
    adapter.connection().close().await;

    assert!(matches!(
        adapter.list_all("downloadItems").await,
        Err(AdapterError::NotConnected { .. })
    ));
    assert!(matches!(
        adapter.replace_all("downloadItems", &[]).await,
        Err(AdapterError::NotConnected { .. })
    ));
}
