//! # Linkboard Utilities
//!
//! Identifier generation, timestamps and log-safe text helpers.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Prefix carried by provisional ids of unaccepted suggestions.
pub const SUGGESTION_ID_PREFIX: &str = "ai-";

/// Generate a fresh item id.
///
/// UUID v4, so an id removed during a session is never handed out again.
///
/// # Examples
///
/// ```
/// use utils::generate_item_id;
///
/// assert_ne!(generate_item_id(), generate_item_id());
/// ```
#[must_use]
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a provisional id for a suggestion: `ai-<millis>-<7 chars>`.
#[must_use]
pub fn generate_suggestion_id() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();
    format!(
        "{SUGGESTION_ID_PREFIX}{}-{suffix}",
        Utc::now().timestamp_millis()
    )
}

/// Whether `id` was issued by [`generate_suggestion_id`].
#[must_use]
pub fn is_suggestion_id(id: &str) -> bool {
    id.starts_with(SUGGESTION_ID_PREFIX)
}

/// Current time as RFC 3339 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Single-line, length-capped copy of `value` for log fields.
#[must_use]
pub fn sanitize_for_log(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated: String = normalized.chars().take(max_chars).collect();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

/// Masks a secret for display, keeping only whether it is set.
#[must_use]
pub fn mask_secret(secret: Option<&str>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => "***",
        _ => "<unset>"
    }
}
