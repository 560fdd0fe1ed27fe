//! Announcement banner read from a published spreadsheet.
//!
//! The announcement is cell A1 of a sheet published as CSV. An empty cell
//! means no announcement.

use crate::error::BannerError;
use config::BannerConfig;
use std::time::Duration;
use tracing::debug;

pub struct BannerClient {
    client: reqwest::Client,
    sheet_url: String
}

impl BannerClient {
    pub fn new(sheet_url: impl Into<String>, timeout: Duration) -> Result<Self, BannerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            sheet_url: sheet_url.into()
        })
    }

    /// Client for the configured sheet, or `None` when the banner is off.
    pub fn from_config(config: &BannerConfig) -> Result<Option<Self>, BannerError> {
        match config.sheet_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) if config.enabled => Ok(Some(Self::new(
                url,
                Duration::from_secs(config.timeout_seconds)
            )?)),
            _ => Ok(None)
        }
    }

    /// Fetches the current announcement.
    ///
    /// A cache-busting `_` query parameter keeps intermediaries from
    /// serving a stale sheet.
    pub async fn fetch(&self) -> Result<Option<String>, BannerError> {
        let response = self
            .client
            .get(&self.sheet_url)
            .query(&[("_", utils::now_millis().to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BannerError::Status {
                status: status.as_u16()
            });
        }

        let body = response.text().await?;
        let message = first_cell(&body);
        debug!(present = message.is_some(), "Fetched announcement");
        Ok(message)
    }
}

/// Trimmed first cell of the first CSV line; `None` when blank.
///
/// A cell wrapped in double quotes is unquoted and `""` collapses to `"`.
/// Commas inside quotes are not supported.
pub fn first_cell(csv: &str) -> Option<String> {
    let line = csv.lines().next().unwrap_or_default();
    let mut cell = line.split(',').next().unwrap_or_default();
    cell = cell.strip_suffix('\r').unwrap_or(cell);

    let unquoted = match cell
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => cell.to_string()
    };

    let trimmed = unquoted.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
