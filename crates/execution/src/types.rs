// In crates/execution/src/types.rs

use core_types::{Side, Symbol};
use rust_decimal::Decimal;

use crate::{Error, Result};

/// Instrument and cost parameters for the simulated trade lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Minimum price increment of the instrument (e.g. 0.00001 for EURUSD).
    pub point_size: Decimal,
    /// Spread paid on long entries, in points.
    pub spread_points: Decimal,
    /// Stop-loss distance from entry, in points.
    pub stop_loss_pips: Decimal,
    /// Take-profit distance from entry, in points.
    pub take_profit_pips: Decimal,
    /// Fixed position size in lots.
    pub lot_size: Decimal,
    /// Flat commission charged once per closed trade.
    pub commission: Decimal,
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<()> {
        if self.point_size <= Decimal::ZERO {
            return Err(Error::InvalidSettings("point_size must be positive".to_string()));
        }
        if self.stop_loss_pips <= Decimal::ZERO || self.take_profit_pips <= Decimal::ZERO {
            return Err(Error::InvalidSettings(
                "stop_loss_pips and take_profit_pips must be positive".to_string(),
            ));
        }
        if self.lot_size <= Decimal::ZERO {
            return Err(Error::InvalidSettings("lot_size must be positive".to_string()));
        }
        Ok(())
    }
}

/// A market order to open a position with attached stop-loss and take-profit.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRequest {
    pub symbol: Symbol,
    pub side: Side,
    pub lot_size: Decimal,
    pub stop_loss_pips: Decimal,
    pub take_profit_pips: Decimal,
    /// Opaque tag attributing the order to this bot.
    pub magic_number: u64,
}
