//! Editing a working copy of a collection before saving it.

use crate::error::BoardError;
use lb_core::Item;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use sync::{CollectionStore, Snapshot, WriteOutcome};
use tracing::debug;

/// Title given to items created in an edit session.
pub const NEW_ITEM_TITLE: &str = "New Download Item";

/// Editable text fields of an item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ItemField {
    Title,
    DownloadUrl,
    RefreshUrl,
    Group
}

/// A private copy of a snapshot's items.
///
/// Nothing reaches the store until [`EditSession::save`], which writes the
/// whole list in one full replace.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    items: Vec<Item>,
    dirty: bool
}

impl EditSession {
    pub fn new(items: &[Item]) -> Self {
        Self {
            items: items.to_vec(),
            dirty: false
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(&snapshot.data)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a placeholder item and returns its id.
    pub fn add_item(&mut self) -> String {
        let id = utils::generate_item_id();
        self.items.push(Item::placeholder(id.clone(), NEW_ITEM_TITLE));
        self.dirty = true;
        id
    }

    /// Appends `item` as given. Fails if its id is already present.
    pub fn push_item(&mut self, item: Item) -> Result<(), BoardError> {
        if self.items.iter().any(|existing| existing.id == item.id) {
            return Err(BoardError::DuplicateItem { id: item.id });
        }
        self.items.push(item);
        self.dirty = true;
        Ok(())
    }

    pub fn remove_item(&mut self, id: &str) -> Result<Item, BoardError> {
        let position = self.position(id)?;
        self.dirty = true;
        Ok(self.items.remove(position))
    }

    pub fn set_field(
        &mut self,
        id: &str,
        field: ItemField,
        value: impl Into<String>
    ) -> Result<(), BoardError> {
        let position = self.position(id)?;
        let item = &mut self.items[position];
        let value = value.into();
        match field {
            ItemField::Title => item.title = value,
            ItemField::DownloadUrl => item.download_url = value,
            ItemField::RefreshUrl => item.refresh_url = value,
            ItemField::Group => item.group = value
        }
        self.dirty = true;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, BoardError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| BoardError::UnknownItem { id: id.to_string() })
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Writes the session's items to `store`.
    pub async fn save(self, store: &CollectionStore) -> WriteOutcome {
        if !self.dirty {
            debug!(collection = store.collection(), "Edit session unchanged, skipping save");
            return WriteOutcome::Unchanged;
        }
        store.write(self.items).await
    }
}
