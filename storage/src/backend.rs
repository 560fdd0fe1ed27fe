//! Builds the configured adapter.

use crate::{DocumentConnection, InMemoryAdapter, LocalFileAdapter, RemoteDocumentAdapter};
use config::{Backend, Config};
use errors::AdapterError;
use lb_core::CollectionAdapter;
use std::sync::Arc;
use tracing::info;

/// An adapter plus the connection it owns, if any.
pub struct OpenedBackend {
    pub adapter: Arc<dyn CollectionAdapter>,
    pub connection: Option<Arc<DocumentConnection>>
}

impl OpenedBackend {
    /// Releases the remote connection; a no-op for local backends.
    pub async fn close(&self) {
        if let Some(connection) = &self.connection {
            connection.close().await;
        }
    }
}

/// Opens the backend selected by `config.store.backend`.
pub fn open_backend(config: &Config) -> Result<OpenedBackend, AdapterError> {
    let opened = match config.store.backend {
        Backend::Memory => OpenedBackend {
            adapter: Arc::new(InMemoryAdapter::new()),
            connection: None
        },
        Backend::Local => OpenedBackend {
            adapter: Arc::new(LocalFileAdapter::new(&config.store.local_path)),
            connection: None
        },
        Backend::Remote => {
            let connection = Arc::new(DocumentConnection::connect(&config.remote)?);
            OpenedBackend {
                adapter: Arc::new(RemoteDocumentAdapter::new(Arc::clone(&connection))),
                connection: Some(connection)
            }
        }
    };

    info!(backend = opened.adapter.name(), "Opened collection backend");
    Ok(opened)
}
