// In crates/risk/src/lib.rs

use rust_decimal::Decimal;
pub mod sizing;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use sizing::{FixedLot, RiskBasedLot};
pub use types::RiskSettings;

/// Decides how many lots a new position should carry.
///
/// Backtests use a fixed configured lot. Live runs size from account equity and
/// the stop-loss distance. The two never share a code path.
pub trait LotSizer: Send + Sync {
    /// The name of the sizing model.
    fn name(&self) -> &'static str;

    /// Lot size for a new position given the current account equity.
    fn lot_size(&self, equity: Decimal) -> Result<Decimal>;
}
