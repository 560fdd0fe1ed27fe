//! Firestore-backed collections over the REST API.
//!
//! [`DocumentConnection`] owns the HTTP client and the database
//! coordinates. It is built once at startup with
//! [`DocumentConnection::connect`], shared behind an `Arc`, and released
//! with [`DocumentConnection::close`]; every call after `close` fails with
//! [`AdapterError::NotConnected`].
//!
//! A replace lists the current document names and then sends one
//! `documents:commit` carrying a delete for every stale document and a full
//! update for every item. Firestore applies a commit atomically.

use crate::firestore_value::{decode_fields, encode_fields};
use async_trait::async_trait;
use config::RemoteStoreConfig;
use errors::AdapterError;
use lb_core::{CollectionAdapter, DocumentBody, Item, RawRecord};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const BACKEND: &str = "firestore";

/// Firestore's per-commit write limit.
pub const MAX_COMMIT_WRITES: usize = 500;

/// Connection to one Firestore database.
pub struct DocumentConnection {
    base_url: String,
    project_id: String,
    database: String,
    api_key: Option<String>,
    page_size: u32,
    client: RwLock<Option<reqwest::Client>>
}

impl DocumentConnection {
    /// Validates `config` and builds the HTTP client.
    pub fn connect(config: &RemoteStoreConfig) -> Result<Self, AdapterError> {
        if config.project_id.trim().is_empty() {
            return Err(AdapterError::InvalidConfig {
                reason: "remote.project_id is empty".to_string()
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AdapterError::InvalidConfig {
                reason: format!("cannot build HTTP client: {e}")
            })?;

        info!(
            project_id = %config.project_id,
            database = %config.database,
            api_key = utils::mask_secret(config.api_key.as_deref()),
            "Connected to document store"
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            database: config.database.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            page_size: config.page_size,
            client: RwLock::new(Some(client))
        })
    }

    /// Drops the HTTP client. Idempotent.
    pub async fn close(&self) {
        if self.client.write().await.take().is_some() {
            info!(project_id = %self.project_id, "Closed document store connection");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }

    async fn client(&self) -> Result<reqwest::Client, AdapterError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or_else(|| AdapterError::NotConnected {
                backend: BACKEND.to_string()
            })
    }

    /// Resource path of the database's document root, without the API host.
    fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_path())
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{}/{collection}", self.base_url, self.documents_path())
    }

    fn commit_url(&self) -> String {
        format!("{}/v1/{}:commit", self.base_url, self.documents_path())
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,

    #[serde(default)]
    next_page_token: Option<String>
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,

    #[serde(default)]
    fields: Map<String, Value>
}

impl FirestoreDocument {
    /// Last path segment of the resource name.
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

/// Collection adapter over a shared [`DocumentConnection`].
pub struct RemoteDocumentAdapter {
    connection: Arc<DocumentConnection>
}

impl RemoteDocumentAdapter {
    pub fn new(connection: Arc<DocumentConnection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<DocumentConnection> {
        &self.connection
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<FirestoreDocument>, String> {
        let conn = &self.connection;
        let client = conn.client().await.map_err(|e| e.to_string())?;
        let url = conn.collection_url(collection);

        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = client
                .get(&url)
                .query(&[("pageSize", conn.page_size.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = conn
                .with_key(request)
                .send()
                .await
                .map_err(|e| format!("request failed: {e}"))?;

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                debug!(collection, "Collection not found, treating as empty");
                return Ok(Vec::new());
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(format!(
                    "status {status}: {}",
                    utils::sanitize_for_log(&body, 200)
                ));
            }

            let page: ListDocumentsResponse = response
                .json()
                .await
                .map_err(|e| format!("malformed list response: {e}"))?;
            documents.extend(page.documents);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break
            }
        }

        Ok(documents)
    }
}

#[async_trait]
impl CollectionAdapter for RemoteDocumentAdapter {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<RawRecord>, AdapterError> {
        self.connection.client().await?;

        let documents = self
            .list_documents(collection)
            .await
            .map_err(|reason| AdapterError::fetch(collection, reason))?;

        debug!(collection, count = documents.len(), "Listed remote collection");
        Ok(documents
            .into_iter()
            .map(|doc| RawRecord::new(doc.id(), decode_fields(&doc.fields)))
            .collect())
    }

    async fn replace_all(&self, collection: &str, items: &[Item]) -> Result<(), AdapterError> {
        let conn = &self.connection;
        let client = conn.client().await?;

        if let Some(bad) = items
            .iter()
            .find(|item| item.id.is_empty() || item.id.contains('/'))
        {
            return Err(AdapterError::write(
                collection,
                format!("invalid document id {:?}", bad.id)
            ));
        }

        let existing = self
            .list_documents(collection)
            .await
            .map_err(|reason| AdapterError::write(collection, reason))?;

        let keep: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
        let mut writes: Vec<Value> = existing
            .iter()
            .filter(|doc| !keep.contains(doc.id()))
            .map(|doc| json!({ "delete": doc.name }))
            .collect();
        let deleted = writes.len();

        for item in items {
            let body = DocumentBody::from_item(item);
            writes.push(json!({
                "update": {
                    "name": conn.document_name(collection, &item.id),
                    "fields": encode_fields(body.fields())
                }
            }));
        }

        if writes.len() > MAX_COMMIT_WRITES {
            return Err(AdapterError::write(
                collection,
                format!(
                    "{} writes exceed the commit limit of {MAX_COMMIT_WRITES}",
                    writes.len()
                )
            ));
        }

        let response = conn
            .with_key(client.post(conn.commit_url()))
            .json(&json!({ "writes": writes }))
            .send()
            .await
            .map_err(|e| AdapterError::write(collection, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(collection, %status, "Commit rejected");
            return Err(AdapterError::write(
                collection,
                format!("status {status}: {}", utils::sanitize_for_log(&body, 200))
            ));
        }

        info!(
            collection,
            count = items.len(),
            deleted,
            "Replaced remote collection"
        );
        Ok(())
    }
}
