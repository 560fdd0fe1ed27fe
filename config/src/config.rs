//! # Configuration Structures
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization, with per-field defaults
//! - Use `validator` for input validation

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Top-level configuration aggregating every subsystem.
///
/// ## Usage
/// ```rust,no_run
/// use config::Config;
///
/// let config = Config::default();
/// println!("general collection: {}", config.store.general_collection);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    /// Which backend holds the collections and under which names
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreConfig,

    /// Remote document store connection settings
    #[serde(default)]
    #[validate(nested)]
    pub remote: RemoteStoreConfig,

    /// Announcement banner source
    #[serde(default)]
    #[validate(nested)]
    pub banner: BannerConfig,

    /// Link suggestion provider
    #[serde(default)]
    #[validate(nested)]
    pub suggestions: SuggestionConfig,

    /// View gate for editing and the special page
    #[serde(default)]
    pub gate: GateConfig,

    /// Logging and metrics
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig
}

/// Storage backend selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    /// Process-local, lost on exit
    Memory,
    /// JSON file on disk
    #[default]
    Local,
    /// Hosted document store
    Remote
}

/// Store configuration.
///
/// ## Fields
/// - `backend`: Storage backend (default: local)
/// - `local_path`: JSON file used by the local backend
/// - `general_collection`: Collection behind the general page (default: "downloadItems")
/// - `special_collection`: Collection behind the special page (default: "specialDownloadItems")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_local_path")]
    #[validate(length(min = 1))]
    pub local_path: String,

    #[serde(default = "default_general_collection")]
    #[validate(length(min = 1, max = 1500))]
    pub general_collection: String,

    #[serde(default = "default_special_collection")]
    #[validate(length(min = 1, max = 1500))]
    pub special_collection: String
}

pub(crate) fn default_local_path() -> String {
    ".linkboard/collections.json".to_string()
}

pub(crate) fn default_general_collection() -> String {
    "downloadItems".to_string()
}

pub(crate) fn default_special_collection() -> String {
    "specialDownloadItems".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            local_path: default_local_path(),
            general_collection: default_general_collection(),
            special_collection: default_special_collection()
        }
    }
}

/// Remote document store (Firestore REST) configuration.
///
/// ## Fields
/// - `base_url`: API root (default: "https://firestore.googleapis.com")
/// - `project_id`: Project holding the database; required for the remote backend
/// - `database`: Database id (default: "(default)")
/// - `api_key`: Optional web API key, sent as the `key` query parameter
/// - `timeout_seconds`: Per-request timeout (default: 30)
/// - `page_size`: Documents per list page (default: 300)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct RemoteStoreConfig {
    #[serde(default = "default_remote_base_url")]
    #[validate(url)]
    pub base_url: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default = "default_remote_database")]
    #[validate(length(min = 1))]
    pub database: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_remote_timeout_seconds")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,

    #[serde(default = "default_remote_page_size")]
    #[validate(range(min = 1, max = 1000))]
    pub page_size: u32
}

pub(crate) fn default_remote_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

pub(crate) fn default_remote_database() -> String {
    "(default)".to_string()
}

pub(crate) fn default_remote_timeout_seconds() -> u64 {
    30
}

pub(crate) fn default_remote_page_size() -> u32 {
    300
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_base_url(),
            project_id: String::new(),
            database: default_remote_database(),
            api_key: None,
            timeout_seconds: default_remote_timeout_seconds(),
            page_size: default_remote_page_size()
        }
    }
}

/// Announcement banner configuration.
///
/// The banner text is the first cell of a published spreadsheet CSV.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct BannerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    #[validate(url)]
    pub sheet_url: Option<String>,

    #[serde(default = "default_banner_timeout_seconds")]
    #[validate(range(min = 1, max = 120))]
    pub timeout_seconds: u64
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_banner_timeout_seconds() -> u64 {
    10
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sheet_url: None,
            timeout_seconds: default_banner_timeout_seconds()
        }
    }
}

/// Link suggestion provider configuration.
///
/// ## Fields
/// - `enabled`: Offer suggestions when a search matches nothing (default: true)
/// - `endpoint`: Generative API root (default: "https://generativelanguage.googleapis.com")
/// - `model`: Model name (default: "gemini-2.5-flash")
/// - `api_key`: API key; suggestions are unavailable without one
/// - `max_suggestions`: Upper bound on suggestions kept (default: 4)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct SuggestionConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_suggestion_endpoint")]
    #[validate(url)]
    pub endpoint: String,

    #[serde(default = "default_suggestion_model")]
    #[validate(length(min = 1))]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_suggestions")]
    #[validate(range(min = 1, max = 20))]
    pub max_suggestions: usize
}

pub(crate) fn default_suggestion_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

pub(crate) fn default_suggestion_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub(crate) fn default_max_suggestions() -> usize {
    4
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_suggestion_endpoint(),
            model: default_suggestion_model(),
            api_key: None,
            max_suggestions: default_max_suggestions()
        }
    }
}

/// View gate configuration.
///
/// The passphrase only hides editing controls and the special page from
/// casual use. It is stored and compared in plain text and is not a
/// security boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GateConfig {
    #[serde(default)]
    pub passphrase: Option<String>
}

/// Observability configuration.
///
/// ## Fields
/// - `log_level`: Log level (default: "info")
/// - `metrics_enabled`: Emit store metrics (default: true)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    #[validate(custom(function = "validate_log_level"))]
    pub log_level: String,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

fn validate_log_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level"))
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_enabled: true
        }
    }
}
