use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use studyplan_core::{StudentPreferences, TargetProgressMode};

use crate::state::{ensure_dir, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preferences: StudentPreferences,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// How many upcoming deadlines `progress` prints.
    pub upcoming_limit: usize,
    pub target_progress: TargetProgressMode,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            upcoming_limit: 5,
            target_progress: TargetProgressMode::default(),
        }
    }
}

pub fn load_config(store: &Store) -> Result<Config> {
    let p = store.config_path();
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).context("parse config.toml")?;
    cfg.preferences
        .validate()
        .with_context(|| format!("invalid preferences in {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config(store: &Store, cfg: &Config) -> Result<()> {
    ensure_dir(store.root())?;
    let p = store.config_path();
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(store: &Store) -> Result<()> {
    let p = store.config_path();
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(store, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
