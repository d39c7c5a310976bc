// Error types.
//
// Only configuration loading produces real errors. The felling pipeline's
// abort conditions (too large, player-made, break denied, tool destroyed) are
// ordinary values: `ClusterTooLarge` as the `Err` side of the cluster search,
// everything else as `ChopOutcome` / `RemovalReport` fields.

use thiserror::Error;

/// Failure to load or validate a `ChopConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The connected log structure has more blocks than `max-tree-size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("log cluster exceeds max tree size of {max_size}")]
pub struct ClusterTooLarge {
    pub max_size: u32,
}
