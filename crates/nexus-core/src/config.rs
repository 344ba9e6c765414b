//! Configuration loading and typed config structures for the Nexus engine.
//!
//! The canonical configuration lives in `nexus-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every field has a default matching the engine's canonical tuning, so an
//! empty file (or no file at all) yields a fully working configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `nexus-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Leveling curve settings.
    #[serde(default)]
    pub leveling: LevelingConfig,

    /// Missed-quest penalty rates.
    #[serde(default)]
    pub penalties: PenaltyConfig,

    /// Fallback reward economics.
    #[serde(default)]
    pub rewards: RewardConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Leveling curve configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LevelingConfig {
    /// Threshold growth per level as a percentage. 125 means each level's
    /// threshold is 1.25x the previous, floored.
    #[serde(default = "default_growth_pct")]
    pub growth_pct: u32,

    /// XP required to go from level 1 to level 2.
    #[serde(default = "default_base_threshold")]
    pub base_threshold: u32,
}

impl LevelingConfig {
    /// Growth percentage with the lower bound enforced.
    ///
    /// Values at or below 100 would make the curve flat or shrinking; the
    /// calculator clamps rather than erroring since it sits on the hot
    /// path of every quest toggle.
    pub const fn effective_growth_pct(&self) -> u32 {
        if self.growth_pct <= 100 { 101 } else { self.growth_pct }
    }
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            growth_pct: default_growth_pct(),
            base_threshold: default_base_threshold(),
        }
    }
}

/// Penalty rates for missed cadence windows, as percentages of the
/// quest's XP reward. Each penalty is ceiling-rounded per quest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PenaltyConfig {
    /// Penalty for a missed daily quest.
    #[serde(default = "default_daily_penalty_pct")]
    pub daily_pct: u32,

    /// Penalty for a weekly quest pending past its week.
    #[serde(default = "default_weekly_penalty_pct")]
    pub weekly_pct: u32,

    /// Penalty for an epic quest pending past its month.
    #[serde(default = "default_epic_penalty_pct")]
    pub epic_pct: u32,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            daily_pct: default_daily_penalty_pct(),
            weekly_pct: default_weekly_penalty_pct(),
            epic_pct: default_epic_penalty_pct(),
        }
    }
}

/// Fallback reward economics, used when the narrative service supplies no
/// quest economics of its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewardConfig {
    /// Base XP for a daily/normal quest before multipliers.
    #[serde(default = "default_base_xp")]
    pub base_xp: u32,

    /// Base credits for a daily/normal quest before multipliers.
    #[serde(default = "default_base_credits")]
    pub base_credits: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base_xp: default_base_xp(),
            base_credits: default_base_credits(),
        }
    }
}

const fn default_growth_pct() -> u32 {
    125
}

const fn default_base_threshold() -> u32 {
    100
}

const fn default_daily_penalty_pct() -> u32 {
    10
}

const fn default_weekly_penalty_pct() -> u32 {
    20
}

const fn default_epic_penalty_pct() -> u32 {
    30
}

const fn default_base_xp() -> u32 {
    25
}

const fn default_base_credits() -> u32 {
    10
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_tuning() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.leveling.growth_pct, 125);
        assert_eq!(cfg.leveling.base_threshold, 100);
        assert_eq!(cfg.penalties.daily_pct, 10);
        assert_eq!(cfg.penalties.weekly_pct, 20);
        assert_eq!(cfg.penalties.epic_pct, 30);
        assert_eq!(cfg.rewards.base_xp, 25);
        assert_eq!(cfg.rewards.base_credits, 10);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let cfg = EngineConfig::parse("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let cfg = EngineConfig::parse("penalties:\n  daily_pct: 5\n").unwrap();
        assert_eq!(cfg.penalties.daily_pct, 5);
        assert_eq!(cfg.penalties.weekly_pct, 20);
        assert_eq!(cfg.leveling.growth_pct, 125);
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let result = EngineConfig::parse("penalties: [not, a, map]");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn growth_pct_floor_is_enforced() {
        let cfg = LevelingConfig {
            growth_pct: 80,
            base_threshold: 100,
        };
        assert_eq!(cfg.effective_growth_pct(), 101);
    }
}
