//! The report link record.

use serde::{Deserialize, Serialize};

/// Group label shown for items whose `group` is empty.
///
/// Only the presentation side applies it; stored items keep `""`.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Placeholder link meaning "no real link yet".
pub const PLACEHOLDER_URL: &str = "#";

/// One report entry with download/refresh links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub download_url: String,

    #[serde(default)]
    pub refresh_url: String,

    #[serde(default)]
    pub group: String,

    /// ISO-8601 timestamp of the last refresh, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_refreshed: Option<String>
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        download_url: impl Into<String>,
        refresh_url: impl Into<String>
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            download_url: download_url.into(),
            refresh_url: refresh_url.into(),
            group: String::new(),
            last_refreshed: None
        }
    }

    /// Item with placeholder links in both slots.
    pub fn placeholder(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, PLACEHOLDER_URL, PLACEHOLDER_URL)
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_last_refreshed(mut self, timestamp: impl Into<String>) -> Self {
        self.last_refreshed = Some(timestamp.into());
        self
    }

    /// Collapses empty optional values to their absent form.
    ///
    /// `last_refreshed` of `Some("")` becomes `None`, so an item normalizes
    /// identically whether it came from a caller or from storage. Only the
    /// empty string is dropped; whitespace is kept as written.
    pub fn normalized(mut self) -> Self {
        if self
            .last_refreshed
            .as_deref()
            .is_some_and(str::is_empty)
        {
            self.last_refreshed = None;
        }
        self
    }

    /// Group heading for display.
    pub fn display_group(&self) -> &str {
        if self.group.is_empty() {
            UNCATEGORIZED
        } else {
            &self.group
        }
    }

    pub fn has_placeholder_links(&self) -> bool {
        self.download_url == PLACEHOLDER_URL && self.refresh_url == PLACEHOLDER_URL
    }
}
