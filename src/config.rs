use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NburyError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Override for the bury store file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Denominator of the per-reconcile expiry-sweep roll: a 1-in-`chance`
    /// probability. `0` disables probabilistic sweeps.
    #[serde(default = "default_sweep_chance")]
    pub chance: u32,
}

fn default_sweep_chance() -> u32 {
    10
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            chance: default_sweep_chance(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("NBURY_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Default global config location (`~/.config/nbury/config.toml`).
    pub fn global_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| NburyError::MissingConfig("config directory not found".to_string()))?;
        Ok(dir.join("nbury/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::global_path()?)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| NburyError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| NburyError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.store {
            self.store.merge(patch);
        }
        if let Some(patch) = patch.sweep {
            self.sweep.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("NBURY_STORE_PATH") {
            if !path.is_empty() {
                self.store.path = Some(PathBuf::from(path));
            }
        }
        if let Ok(chance) = std::env::var("NBURY_SWEEP_CHANCE") {
            self.sweep.chance = chance.parse().map_err(|_| {
                NburyError::Config(format!(
                    "NBURY_SWEEP_CHANCE must be a non-negative integer, got '{chance}'"
                ))
            })?;
        }
        Ok(())
    }
}

impl StoreConfig {
    fn merge(&mut self, patch: StorePatch) {
        if let Some(path) = patch.path {
            self.path = Some(path);
        }
    }
}

impl SweepConfig {
    fn merge(&mut self, patch: SweepPatch) {
        if let Some(chance) = patch.chance {
            self.chance = chance;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    store: Option<StorePatch>,
    sweep: Option<SweepPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StorePatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct SweepPatch {
    chance: Option<u32>,
}
