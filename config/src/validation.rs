//! # Configuration Validation
//!
//! Field rules come from the `validator` derives on each struct; this module
//! adds the checks that span sections.

use crate::config::{Backend, Config};
use validator::Validate;

#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration: {0}")]
    Fields(#[from] validator::ValidationErrors),

    #[error("remote.project_id is required when store.backend = remote")]
    MissingProjectId,

    #[error("store.general_collection and store.special_collection must differ")]
    SameCollection
}

/// Validate a fully merged configuration.
///
/// ## Rules
/// - Every nested section passes its `validator` rules
/// - The remote backend needs a `remote.project_id`
/// - The two pages use distinct collections
pub fn validate_config(config: &Config) -> Result<(), ConfigValidationError> {
    config.validate()?;

    if config.store.backend == Backend::Remote && config.remote.project_id.trim().is_empty() {
        return Err(ConfigValidationError::MissingProjectId);
    }

    if config.store.general_collection == config.store.special_collection {
        return Err(ConfigValidationError::SameCollection);
    }

    Ok(())
}
