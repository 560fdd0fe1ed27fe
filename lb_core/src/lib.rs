//! Core types for linkboard collections.
//!
//! Holds the [`Item`] record, the adapter-neutral [`RawRecord`], the
//! persisted [`DocumentBody`] and the [`CollectionAdapter`] trait every
//! storage backend implements.

pub mod adapter;
pub mod document;
pub mod item;
pub mod record;
pub mod seed;

pub use adapter::CollectionAdapter;
pub use document::{DocumentBody, records_for};
pub use item::{Item, PLACEHOLDER_URL, UNCATEGORIZED};
pub use record::{RawRecord, normalize_records};
pub use seed::default_items;
