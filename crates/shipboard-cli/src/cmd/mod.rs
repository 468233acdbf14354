pub mod app;
pub mod board;
pub mod config;
pub mod feature;
pub mod import;
pub mod init;
pub mod release;

use anyhow::Context;
use shipboard_core::{board::Board, config::Config, state::State, store::FileStore};
use std::path::Path;

/// An initialized workspace bound to the app a command acts on.
pub struct Workspace {
    pub store: FileStore,
    pub config: Config,
    pub app_id: String,
}

impl Workspace {
    /// `app` if given, else the active app from state.
    pub fn open(root: &Path, app: Option<&str>) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load config")?;
        let state = State::load(root).context("failed to load state")?;
        let app_id = state.resolve_app(app)?.to_string();
        Ok(Self {
            store: FileStore::new(root),
            config,
            app_id,
        })
    }

    pub fn board(&mut self) -> anyhow::Result<Board<'_, FileStore>> {
        let config = self.config.board.clone();
        Board::open(&mut self.store, &self.app_id, config)
            .with_context(|| format!("failed to open app '{}'", self.app_id))
    }
}
