// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    /// Bars in the fast simple moving average.
    #[serde(default = "default_short_period")]
    pub short_period: usize,
    /// Bars in the slow simple moving average. Must exceed `short_period`.
    #[serde(default = "default_long_period")]
    pub long_period: usize,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
        }
    }
}

fn default_short_period() -> usize {
    9
}

fn default_long_period() -> usize {
    21
}
