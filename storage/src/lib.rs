//! # Storage Layer
//!
//! [`CollectionAdapter`](lb_core::CollectionAdapter) implementations:
//!
//! - [`InMemoryAdapter`]: process-local collections, with fault injection
//! - [`LocalFileAdapter`]: every collection in one JSON file on disk
//! - [`RemoteDocumentAdapter`]: Firestore REST over an injected
//!   [`DocumentConnection`]

pub mod backend;
pub mod firestore_value;
pub mod local;
pub mod memory;
pub mod remote;

pub use backend::{OpenedBackend, open_backend};
pub use local::LocalFileAdapter;
pub use memory::InMemoryAdapter;
pub use remote::{DocumentConnection, RemoteDocumentAdapter};
