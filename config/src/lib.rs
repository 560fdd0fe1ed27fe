//! # Configuration System
//!
//! Centralized configuration for linkboard.
//!
//! This crate provides:
//! - Configuration structures for the store, backends and presentation helpers
//! - Environment variable loading (`LB_*`)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (CLI > env > file > defaults)
//! - Configuration validation

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    Backend, BannerConfig, Config, GateConfig, ObservabilityConfig, RemoteStoreConfig,
    StoreConfig, SuggestionConfig,
};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{EnvError, load_env_layer, load_from_env};
pub use precedence::{ConfigLayer, merge_configs};
pub use validation::{ConfigValidationError, validate_config};
pub use ::validator::Validate;
