//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! The file is a plain [`Config`]: it overrides a field only where its value
//! differs from the default. Environment and CLI sources are
//! [`ConfigLayer`]s that name the fields they set, and those fields win even
//! when the value equals the default. Fields a layer leaves unset keep the
//! lower-precedence value.

use crate::config::Config;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// A configuration source that knows which fields it set explicitly.
///
/// Paths are dotted field names such as `store.backend`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayer {
    pub config: Config,
    pub explicit: BTreeSet<&'static str>
}

impl ConfigLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one field through `apply` and marks `path` explicit.
    pub fn set(mut self, path: &'static str, apply: impl FnOnce(&mut Config)) -> Self {
        apply(&mut self.config);
        self.explicit.insert(path);
        self
    }

    pub fn is_explicit(&self, path: &str) -> bool {
        self.explicit.contains(path)
    }
}

/// Merge configuration sources, highest precedence last.
///
/// ## Usage
/// ```rust,no_run
/// use config::{Config, load_env_layer, load_from_file, merge_configs};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let from_file = load_from_file(Path::new("linkboard.toml"))?;
///     let from_env = load_env_layer()?;
///     let _config = merge_configs(Config::default(), from_file, from_env, None);
///     Ok(())
/// }
/// ```
pub fn merge_configs(
    defaults: Config,
    file_config: Config,
    env_layer: ConfigLayer,
    cli_layer: Option<ConfigLayer>
) -> Config {
    let mut config = defaults;

    config = merge_with_logging(config, &file_config, None, "file");
    config = merge_with_logging(config, &env_layer.config, Some(&env_layer.explicit), "env");

    if let Some(cli) = cli_layer {
        config = merge_with_logging(config, &cli.config, Some(&cli.explicit), "cli");
    }

    config
}

fn merge_with_logging(
    mut base: Config,
    over: &Config,
    explicit: Option<&BTreeSet<&'static str>>,
    source_name: &str
) -> Config {
    let defaults = Config::default();
    let mut changes = Vec::new();

    {
        let mut m = Merger {
            changes: &mut changes,
            explicit
        };

        m.field(
            &mut base.store.backend,
            &over.store.backend,
            &defaults.store.backend,
            "store.backend"
        );
        m.field(
            &mut base.store.local_path,
            &over.store.local_path,
            &defaults.store.local_path,
            "store.local_path"
        );
        m.field(
            &mut base.store.general_collection,
            &over.store.general_collection,
            &defaults.store.general_collection,
            "store.general_collection"
        );
        m.field(
            &mut base.store.special_collection,
            &over.store.special_collection,
            &defaults.store.special_collection,
            "store.special_collection"
        );

        m.field(
            &mut base.remote.base_url,
            &over.remote.base_url,
            &defaults.remote.base_url,
            "remote.base_url"
        );
        m.field(
            &mut base.remote.project_id,
            &over.remote.project_id,
            &defaults.remote.project_id,
            "remote.project_id"
        );
        m.field(
            &mut base.remote.database,
            &over.remote.database,
            &defaults.remote.database,
            "remote.database"
        );
        m.secret(
            &mut base.remote.api_key,
            &over.remote.api_key,
            "remote.api_key"
        );
        m.field(
            &mut base.remote.timeout_seconds,
            &over.remote.timeout_seconds,
            &defaults.remote.timeout_seconds,
            "remote.timeout_seconds"
        );
        m.field(
            &mut base.remote.page_size,
            &over.remote.page_size,
            &defaults.remote.page_size,
            "remote.page_size"
        );

        m.field(
            &mut base.banner.enabled,
            &over.banner.enabled,
            &defaults.banner.enabled,
            "banner.enabled"
        );
        m.field(
            &mut base.banner.sheet_url,
            &over.banner.sheet_url,
            &defaults.banner.sheet_url,
            "banner.sheet_url"
        );
        m.field(
            &mut base.banner.timeout_seconds,
            &over.banner.timeout_seconds,
            &defaults.banner.timeout_seconds,
            "banner.timeout_seconds"
        );

        m.field(
            &mut base.suggestions.enabled,
            &over.suggestions.enabled,
            &defaults.suggestions.enabled,
            "suggestions.enabled"
        );
        m.field(
            &mut base.suggestions.endpoint,
            &over.suggestions.endpoint,
            &defaults.suggestions.endpoint,
            "suggestions.endpoint"
        );
        m.field(
            &mut base.suggestions.model,
            &over.suggestions.model,
            &defaults.suggestions.model,
            "suggestions.model"
        );
        m.secret(
            &mut base.suggestions.api_key,
            &over.suggestions.api_key,
            "suggestions.api_key"
        );
        m.field(
            &mut base.suggestions.max_suggestions,
            &over.suggestions.max_suggestions,
            &defaults.suggestions.max_suggestions,
            "suggestions.max_suggestions"
        );

        m.secret(
            &mut base.gate.passphrase,
            &over.gate.passphrase,
            "gate.passphrase"
        );

        m.field(
            &mut base.observability.log_level,
            &over.observability.log_level,
            &defaults.observability.log_level,
            "observability.log_level"
        );
        m.field(
            &mut base.observability.metrics_enabled,
            &over.observability.metrics_enabled,
            &defaults.observability.metrics_enabled,
            "observability.metrics_enabled"
        );
    }

    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

struct Merger<'a> {
    changes: &'a mut Vec<String>,
    explicit: Option<&'a BTreeSet<&'static str>>
}

impl Merger<'_> {
    /// Whether `over` carries a value for `path`: named by a layer, or for a
    /// plain config, different from the default.
    fn sets<T: PartialEq>(&self, over: &T, default: &T, path: &str) -> bool {
        match self.explicit {
            Some(explicit) => explicit.contains(path),
            None => over != default
        }
    }

    fn field<T: PartialEq + Clone + Debug>(
        &mut self,
        base: &mut T,
        over: &T,
        default: &T,
        path: &str
    ) {
        if self.sets(over, default, path) && over != base {
            self.changes.push(format!("{path} = {over:?}"));
            base.clone_from(over);
        }
    }

    fn secret(&mut self, base: &mut Option<String>, over: &Option<String>, path: &str) {
        if self.sets(over, &None, path) && over != base {
            self.changes.push(format!(
                "{path} = {}",
                utils::mask_secret(over.as_deref())
            ));
            base.clone_from(over);
        }
    }
}
