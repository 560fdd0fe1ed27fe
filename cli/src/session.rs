//! Configuration loading and the opened board shared by every command.

use crate::commands::GlobalArgs;
use anyhow::{Context, Result, bail};
use board::{Board, GateDecision, Page};
use config::{
    Config, ConfigLayer, load_env_layer, load_from_file, merge_configs, validate_config
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storage::OpenedBackend;
use sync::CollectionStore;
use tracing::debug;

/// Merges defaults, the config file, `LB_*` variables and CLI flags.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let file_config = match &global.config {
        Some(path) => load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default()
    };
    let env_layer = load_env_layer()?;

    let cli_layer = global
        .backend
        .map(|backend| ConfigLayer::new().set("store.backend", |c| c.store.backend = backend));

    let config = merge_configs(Config::default(), file_config, env_layer, cli_layer);
    validate_config(&config)?;
    Ok(config)
}

/// Where `suggest` keeps the suggestions it last showed, beside the local
/// data file.
pub fn offer_path(config: &Config) -> PathBuf {
    Path::new(&config.store.local_path).with_extension("suggestions.json")
}

pub struct Session {
    pub config: Config,
    pub board: Board,
    backend: OpenedBackend
}

impl Session {
    /// Opens the backend, initializes both pages and selects `--page`.
    pub async fn open(global: &GlobalArgs) -> Result<Self> {
        let config = load_config(global)?;
        let backend = storage::open_backend(&config)?;
        let mut board = Board::from_config(&config, Arc::clone(&backend.adapter));
        board.initialize().await;

        if let GateDecision::Rejected { message } =
            board.switch_to(global.page, global.passphrase.as_deref())
        {
            backend.close().await;
            bail!(message);
        }

        debug!(page = %global.page, backend = backend.adapter.name(), "Session opened");
        Ok(Self {
            config,
            board,
            backend
        })
    }

    pub fn page(&self) -> Page {
        self.board.page()
    }

    pub fn store(&self) -> &CollectionStore {
        self.board.current()
    }

    /// Releases the backend and fails if the current page's store ended
    /// in an error.
    pub async fn close(self) -> Result<()> {
        self.backend.close().await;
        match self.board.snapshot().error {
            Some(failure) => bail!("{} error: {}", failure.kind, failure.message),
            None => Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Backend;
    use std::path::PathBuf;

    fn global() -> GlobalArgs {
        GlobalArgs {
            config: None,
            backend: None,
            page: Page::General,
            json: false,
            passphrase: None
        }
    }

    #[test]
    fn test_backend_flag_overrides() {
        let mut args = global();
        args.backend = Some(Backend::Memory);
        assert_eq!(load_config(&args).unwrap().store.backend, Backend::Memory);
    }

    #[test]
    fn test_default_backend_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkboard.toml");
        std::fs::write(
            &path,
            "[store]\nbackend = \"remote\"\n\n[remote]\nproject_id = \"reports\"\n"
        )
        .unwrap();

        let mut args = global();
        args.config = Some(path);
        assert_eq!(load_config(&args).unwrap().store.backend, Backend::Remote);

        args.backend = Some(Backend::Local);
        assert_eq!(load_config(&args).unwrap().store.backend, Backend::Local);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let mut args = global();
        args.config = Some(PathBuf::from("/nonexistent/linkboard.toml"));
        assert!(load_config(&args).is_err());
    }

    #[tokio::test]
    async fn test_memory_session_seeds_general_page() {
        let mut args = global();
        args.backend = Some(Backend::Memory);

        let session = Session::open(&args).await.unwrap();
        assert_eq!(session.page(), Page::General);
        assert_eq!(session.store().read().data.len(), 16);
        session.close().await.unwrap();
    }
}
