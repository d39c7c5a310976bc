// Data-driven felling configuration.
//
// `ChopConfig` holds every tunable the felling pipeline reads. It is loaded
// from JSON once at startup and passed by reference into each operation; no
// module keeps a global copy. Keys are kebab-case (`max-tree-size`,
// `log-search-radius`, ...) and all of them are optional: a missing key takes
// its default, so `{}` is a valid config file.
//
// See also: `chop.rs` which reads the search/classification knobs,
// `leaf_decay.rs` for the leaf radius and decay distance, `sim.rs` which owns
// the config as part of `ChopSim`.

use crate::error::ConfigError;
use crate::types::MAX_LEAF_DISTANCE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest accepted `leaf-decay-delay-ticks`: one hour at 20 ticks per second.
pub const MAX_LEAF_DECAY_DELAY_TICKS: u64 = 72_000;

/// Felling configuration. Never mutated after load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChopConfig {
    /// Only fell trees when the player holds an axe. `require-axe` is
    /// accepted as an older spelling.
    #[serde(alias = "require-axe")]
    pub require_tool: bool,

    /// Largest log cluster that may be felled at once. Bigger structures are
    /// left to the host's single-block break.
    pub max_tree_size: u32,

    /// Manhattan distance from the broken log beyond which the log search
    /// does not look.
    pub log_search_radius: u32,

    /// Treat log clusters without any adjacent leaves as player-built and
    /// leave them standing.
    pub check_for_leaves: bool,

    /// Manhattan distance from the felled logs within which connected
    /// leaves are weakened.
    pub leaf_search_radius: u32,

    /// Emit a trace line for every search and removal step.
    pub debug_mode: bool,

    /// Ticks between felling and leaf weakening. Must be at least 1 so the
    /// log removals are committed before leaves are re-read, and at most
    /// `MAX_LEAF_DECAY_DELAY_TICKS`.
    pub leaf_decay_delay_ticks: u64,

    /// Distance written into weakened leaves (1..=7). 7 means "no log in
    /// reach" and makes the host decay them on its next update.
    pub leaf_decay_distance: u8,
}

impl Default for ChopConfig {
    fn default() -> Self {
        Self {
            require_tool: true,
            max_tree_size: 500,
            log_search_radius: 15,
            check_for_leaves: true,
            leaf_search_radius: 7,
            debug_mode: false,
            leaf_decay_delay_ticks: 1,
            leaf_decay_distance: MAX_LEAF_DISTANCE,
        }
    }
}

impl ChopConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        if config.debug_mode {
            log::warn!("timberfall debug mode is enabled");
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LEAF_DECAY_DELAY_TICKS).contains(&self.leaf_decay_delay_ticks) {
            return Err(ConfigError::Invalid(format!(
                "leaf-decay-delay-ticks must be within 1..={MAX_LEAF_DECAY_DELAY_TICKS}, got {}",
                self.leaf_decay_delay_ticks
            )));
        }
        if !(1..=MAX_LEAF_DISTANCE).contains(&self.leaf_decay_distance) {
            return Err(ConfigError::Invalid(format!(
                "leaf-decay-distance must be within 1..={MAX_LEAF_DISTANCE}, got {}",
                self.leaf_decay_distance
            )));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
