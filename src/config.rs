//! Miner configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AprioriError, Result};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_ENV: &str = "APRIORI_CONFIG";

/// What to do when every candidate of a tier is pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TierExhaustion {
    /// Keep counting the remaining, larger tiers.
    #[default]
    Continue,
    /// End the pruning pass at the first tier left empty.
    StopWhenTierEmpty,
}

/// Tunables for [`crate::Apriori`]. The support threshold itself is passed
/// separately.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MinerConfig {
    /// Behaviour once a tier is fully pruned. Default: continue.
    pub tier_exhaustion: Option<TierExhaustion>,
    /// Upper bound on frequent single items before subset expansion.
    /// Default: unlimited.
    pub max_frequent_items: Option<usize>,
}

impl MinerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: MinerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| AprioriError::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    /// Loads the file named by `APRIORI_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn effective_tier_exhaustion(&self) -> TierExhaustion {
        self.tier_exhaustion.unwrap_or_default()
    }

    pub fn effective_max_frequent_items(&self) -> Option<usize> {
        self.max_frequent_items
    }

    fn validate(&self) -> Result<()> {
        if self.max_frequent_items == Some(0) {
            return Err(AprioriError::Config(
                "max_frequent_items must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
