//! # Environment Variable Loader
//!
//! Loads configuration from `LB_*` environment variables. Unset variables
//! keep the default; set but unparsable values are an error.
//!
//! ## Environment Variables
//! ### Store
//! - `LB_BACKEND`: memory | local | remote (default: local)
//! - `LB_LOCAL_PATH`: JSON file for the local backend
//! - `LB_GENERAL_COLLECTION` / `LB_SPECIAL_COLLECTION`: collection names
//!
//! ### Remote document store
//! - `LB_REMOTE_BASE_URL`, `LB_REMOTE_PROJECT_ID`, `LB_REMOTE_DATABASE`
//! - `LB_REMOTE_API_KEY`, `LB_REMOTE_TIMEOUT_SECONDS`, `LB_REMOTE_PAGE_SIZE`
//!
//! ### Presentation
//! - `LB_BANNER_ENABLED`, `LB_BANNER_SHEET_URL`, `LB_BANNER_TIMEOUT_SECONDS`
//! - `LB_SUGGESTIONS_ENABLED`, `LB_SUGGESTIONS_ENDPOINT`, `LB_SUGGESTIONS_MODEL`,
//!   `LB_SUGGESTIONS_API_KEY`, `LB_SUGGESTIONS_MAX`
//! - `LB_GATE_PASSPHRASE`
//!
//! ### Observability
//! - `LB_LOG_LEVEL`, `LB_METRICS_ENABLED`

use crate::config::{
    Backend, BannerConfig, Config, GateConfig, ObservabilityConfig, RemoteStoreConfig,
    StoreConfig, SuggestionConfig,
};
use crate::precedence::ConfigLayer;
use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

/// A set environment variable whose value does not parse.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key}: {value:?} ({reason})")]
pub struct EnvError {
    pub key: String,
    pub value: String,
    pub reason: String
}

/// Load configuration from environment variables on top of the defaults.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("backend: {}", config.store.backend);
///     Ok(())
/// }
/// ```
pub fn load_from_env() -> Result<Config, EnvError> {
    load_env_layer().map(|layer| layer.config)
}

/// Like [`load_from_env`], also recording which fields a variable set.
///
/// A set variable overrides lower-precedence sources even when its value
/// equals the default.
pub fn load_env_layer() -> Result<ConfigLayer, EnvError> {
    let mut env = EnvReader::default();
    let config = Config {
        store: load_store_from_env(&mut env)?,
        remote: load_remote_from_env(&mut env)?,
        banner: load_banner_from_env(&mut env)?,
        suggestions: load_suggestions_from_env(&mut env)?,
        gate: GateConfig {
            passphrase: env.string("LB_GATE_PASSPHRASE", "gate.passphrase")
        },
        observability: load_observability_from_env(&mut env)?
    };
    Ok(ConfigLayer {
        config,
        explicit: env.explicit
    })
}

fn load_store_from_env(env: &mut EnvReader) -> Result<StoreConfig, EnvError> {
    let defaults = StoreConfig::default();
    Ok(StoreConfig {
        backend: env
            .parse::<Backend>("LB_BACKEND", "store.backend")?
            .unwrap_or(defaults.backend),
        local_path: env
            .string("LB_LOCAL_PATH", "store.local_path")
            .unwrap_or(defaults.local_path),
        general_collection: env
            .string("LB_GENERAL_COLLECTION", "store.general_collection")
            .unwrap_or(defaults.general_collection),
        special_collection: env
            .string("LB_SPECIAL_COLLECTION", "store.special_collection")
            .unwrap_or(defaults.special_collection)
    })
}

fn load_remote_from_env(env: &mut EnvReader) -> Result<RemoteStoreConfig, EnvError> {
    let defaults = RemoteStoreConfig::default();
    Ok(RemoteStoreConfig {
        base_url: env
            .string("LB_REMOTE_BASE_URL", "remote.base_url")
            .unwrap_or(defaults.base_url),
        project_id: env
            .string("LB_REMOTE_PROJECT_ID", "remote.project_id")
            .unwrap_or(defaults.project_id),
        database: env
            .string("LB_REMOTE_DATABASE", "remote.database")
            .unwrap_or(defaults.database),
        api_key: env.string("LB_REMOTE_API_KEY", "remote.api_key"),
        timeout_seconds: env
            .parse("LB_REMOTE_TIMEOUT_SECONDS", "remote.timeout_seconds")?
            .unwrap_or(defaults.timeout_seconds),
        page_size: env
            .parse("LB_REMOTE_PAGE_SIZE", "remote.page_size")?
            .unwrap_or(defaults.page_size)
    })
}

fn load_banner_from_env(env: &mut EnvReader) -> Result<BannerConfig, EnvError> {
    let defaults = BannerConfig::default();
    Ok(BannerConfig {
        enabled: env
            .parse("LB_BANNER_ENABLED", "banner.enabled")?
            .unwrap_or(defaults.enabled),
        sheet_url: env.string("LB_BANNER_SHEET_URL", "banner.sheet_url"),
        timeout_seconds: env
            .parse("LB_BANNER_TIMEOUT_SECONDS", "banner.timeout_seconds")?
            .unwrap_or(defaults.timeout_seconds)
    })
}

fn load_suggestions_from_env(env: &mut EnvReader) -> Result<SuggestionConfig, EnvError> {
    let defaults = SuggestionConfig::default();
    Ok(SuggestionConfig {
        enabled: env
            .parse("LB_SUGGESTIONS_ENABLED", "suggestions.enabled")?
            .unwrap_or(defaults.enabled),
        endpoint: env
            .string("LB_SUGGESTIONS_ENDPOINT", "suggestions.endpoint")
            .unwrap_or(defaults.endpoint),
        model: env
            .string("LB_SUGGESTIONS_MODEL", "suggestions.model")
            .unwrap_or(defaults.model),
        api_key: env.string("LB_SUGGESTIONS_API_KEY", "suggestions.api_key"),
        max_suggestions: env
            .parse("LB_SUGGESTIONS_MAX", "suggestions.max_suggestions")?
            .unwrap_or(defaults.max_suggestions)
    })
}

fn load_observability_from_env(env: &mut EnvReader) -> Result<ObservabilityConfig, EnvError> {
    let defaults = ObservabilityConfig::default();
    Ok(ObservabilityConfig {
        log_level: env
            .string("LB_LOG_LEVEL", "observability.log_level")
            .unwrap_or(defaults.log_level),
        metrics_enabled: env
            .parse("LB_METRICS_ENABLED", "observability.metrics_enabled")?
            .unwrap_or(defaults.metrics_enabled)
    })
}

/// Reads variables and remembers the config path of every one that is set.
#[derive(Default)]
struct EnvReader {
    explicit: BTreeSet<&'static str>
}

impl EnvReader {
    /// Non-empty value of `key`, if set.
    fn string(&mut self, key: &str, path: &'static str) -> Option<String> {
        let value = env::var(key).ok().filter(|v| !v.trim().is_empty());
        if value.is_some() {
            self.explicit.insert(path);
        }
        value
    }

    fn parse<T>(&mut self, key: &str, path: &'static str) -> Result<Option<T>, EnvError>
    where
        T: FromStr,
        T::Err: std::fmt::Display
    {
        match self.string(key, path) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| EnvError {
                    key: key.to_string(),
                    reason: e.to_string(),
                    value
                }),
            None => Ok(None)
        }
    }
}
