//! Application context shared by CLI commands.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{NburyError, Result};
use crate::store::BuryStore;

/// Explicitly constructed per-process context: configuration plus the
/// resolved data directory. Passed to every command; there is no ambient
/// global state.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let data_dir = resolve_data_dir()?;
        Ok(Self {
            config,
            data_dir,
            robot_mode: cli.robot,
        })
    }

    /// Store file location: config override, else `<data_dir>/bury.db`.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.config
            .store
            .path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("bury.db"))
    }

    /// Open the store for one operation. Opened per use rather than held
    /// for the process lifetime.
    pub fn open_store(&self) -> Result<BuryStore> {
        BuryStore::open(self.store_path())
    }
}

fn resolve_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("nbury"))
        .ok_or_else(|| NburyError::MissingConfig("data directory not found".to_string()))
}
