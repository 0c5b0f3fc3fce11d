//! # Configuration - Canvas and Recall Parameters
//!
//! Defaults match the classic demo: a 16×16 grid relaxed with a step of
//! 2^-7 per frame. Every value can be overridden from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_RECALL_RATE;
use crate::error::{HopfieldError, HopfieldResult};

/// Largest accepted grid side (4096 cells, about 8.4M weights)
pub const MAX_GRID_SIDE: usize = 64;

/// Master configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HopfieldConfig {
    /// Grid geometry
    pub grid: GridConfig,

    /// Recall dynamics
    pub recall: RecallConfig,

    /// Where the weight store lives between runs
    pub persistence: PersistenceConfig,
}

/// Square painting grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells per side (the network has `side²` cells)
    pub side: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { side: 16 }
    }
}

impl GridConfig {
    /// Total cell count
    pub fn cells(&self) -> usize {
        self.side * self.side
    }
}

/// Recall sweep settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecallConfig {
    /// Step size of one sweep
    pub rate: f64,

    /// Frame interval while the host runs (one sweep per frame)
    pub frame_interval_ms: u64,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RECALL_RATE,
            frame_interval_ms: 33,
        }
    }
}

/// Snapshot location
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// No path means memories live only as long as the process
    pub memory_path: Option<PathBuf>,
}

impl HopfieldConfig {
    /// Defaults overridden by `HOPFIELD_*` environment variables
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(side) = env_parse("HOPFIELD_GRID_SIDE") {
            config.grid.side = side;
        }
        if let Some(rate) = env_parse("HOPFIELD_RATE") {
            config.recall.rate = rate;
        }
        if let Some(ms) = env_parse("HOPFIELD_FRAME_MS") {
            config.recall.frame_interval_ms = ms;
        }
        if let Ok(path) = std::env::var("HOPFIELD_MEMORY") {
            if !path.is_empty() {
                config.persistence.memory_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Reject values the host cannot run with
    pub fn validate(&self) -> HopfieldResult<()> {
        if self.grid.side == 0 {
            return Err(HopfieldError::config("grid side must be at least 1"));
        }
        if self.grid.side > MAX_GRID_SIDE {
            return Err(HopfieldError::config(format!(
                "grid side {} exceeds the maximum of {}",
                self.grid.side, MAX_GRID_SIDE
            )));
        }
        if !self.recall.rate.is_finite() || self.recall.rate <= 0.0 {
            return Err(HopfieldError::config(format!(
                "recall rate must be a positive finite number, got {}",
                self.recall.rate
            )));
        }
        if self.recall.frame_interval_ms == 0 {
            return Err(HopfieldError::config("frame interval must be at least 1 ms"));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HopfieldConfig::default();
        assert_eq!(config.grid.side, 16);
        assert_eq!(config.grid.cells(), 256);
        assert_eq!(config.recall.rate, 2f64.powi(-7));
        assert!(config.persistence.memory_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = HopfieldConfig::default();
        config.grid.side = 0;
        assert!(matches!(config.validate(), Err(HopfieldError::Config(_))));

        let mut config = HopfieldConfig::default();
        config.grid.side = MAX_GRID_SIDE;
        assert!(config.validate().is_ok());
        config.grid.side = MAX_GRID_SIDE + 1;
        assert!(matches!(config.validate(), Err(HopfieldError::Config(_))));
        config.grid.side = 1000;
        assert!(config.validate().is_err());

        let mut config = HopfieldConfig::default();
        config.recall.rate = -0.5;
        assert!(config.validate().is_err());

        config.recall.rate = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = HopfieldConfig::default();
        config.recall.frame_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        std::env::set_var("HOPFIELD_TEST_GARBAGE", "sixteen");
        assert_eq!(env_parse::<usize>("HOPFIELD_TEST_GARBAGE"), None);

        std::env::set_var("HOPFIELD_TEST_SIDE", "8");
        assert_eq!(env_parse::<usize>("HOPFIELD_TEST_SIDE"), Some(8));

        assert_eq!(env_parse::<usize>("HOPFIELD_TEST_UNSET"), None);
    }
}
