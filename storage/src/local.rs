//! Collections persisted to a single JSON file.
//!
//! File layout:
//!
//! ```json
//! { "collections": { "downloadItems": [ { "id": "1", "title": "...", "downloadUrl": "#", "refreshUrl": "#" } ] } }
//! ```
//!
//! A write goes to a sibling temp file that is then renamed over the
//! original, so readers see either the previous file or the new one.

use async_trait::async_trait;
use errors::AdapterError;
use lb_core::{CollectionAdapter, DocumentBody, Item, RawRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocalFile {
    #[serde(default)]
    collections: BTreeMap<String, Vec<StoredEntry>>
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(default)]
    id: String,

    #[serde(flatten)]
    fields: Map<String, Value>
}

pub struct LocalFileAdapter {
    path: PathBuf,
    write_lock: Mutex<()>
}

impl LocalFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(())
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<LocalFile, String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(LocalFile::default()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| format!("{} is not a valid collections file: {e}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LocalFile::default()),
            Err(e) => Err(format!("cannot read {}: {e}", self.path.display()))
        }
    }

    async fn write_file(&self, file: &LocalFile) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
        }

        let bytes = serde_json::to_vec_pretty(file).map_err(|e| e.to_string())?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| format!("cannot write {}: {e}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| format!("cannot replace {}: {e}", self.path.display()))
    }
}

#[async_trait]
impl CollectionAdapter for LocalFileAdapter {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<RawRecord>, AdapterError> {
        let file = self
            .read_file()
            .await
            .map_err(|reason| AdapterError::fetch(collection, reason))?;

        let records: Vec<RawRecord> = file
            .collections
            .get(collection)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| RawRecord::new(entry.id.clone(), entry.fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        debug!(collection, count = records.len(), path = %self.path.display(), "Listed local collection");
        Ok(records)
    }

    async fn replace_all(&self, collection: &str, items: &[Item]) -> Result<(), AdapterError> {
        let _guard = self.write_lock.lock().await;

        let mut file = self
            .read_file()
            .await
            .map_err(|reason| AdapterError::write(collection, reason))?;

        let entries = items
            .iter()
            .map(|item| StoredEntry {
                id: item.id.clone(),
                fields: DocumentBody::from_item(item).into_fields()
            })
            .collect();
        file.collections.insert(collection.to_string(), entries);

        self.write_file(&file)
            .await
            .map_err(|reason| AdapterError::write(collection, reason))?;

        info!(collection, count = items.len(), path = %self.path.display(), "Replaced local collection");
        Ok(())
    }
}
