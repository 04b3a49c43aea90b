// In crates/analytics/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point of the account balance curve, taken at each trade exit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}

/// Summary statistics over the closed trades of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceReport {
    /// Change of the final balance against the initial balance, in percent.
    pub total_return_pct: f64,
    /// Share of trades with a strictly positive profit, in percent.
    pub win_rate_pct: f64,
    /// Largest peak-to-trough decline of the balance sequence, in percent of the peak.
    pub max_drawdown_pct: f64,
    pub total_trades: u32,
    pub net_pnl: Decimal,
}

impl PerformanceReport {
    /// Creates a new, empty report with all metrics at zero.
    pub fn new() -> Self {
        Self::default()
    }
}
