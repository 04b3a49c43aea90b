// In crates/risk/src/types.rs

use rust_decimal::Decimal;

/// Parameters for equity-based lot sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSettings {
    /// Share of equity put at risk per trade, in percent (e.g. 1.0 for 1%).
    pub risk_per_trade_percent: Decimal,
    /// Stop-loss distance in points.
    pub stop_loss_pips: Decimal,
    /// Account-currency value of one point for one lot.
    pub point_value_per_lot: Decimal,
    pub min_lot: Decimal,
    pub max_lot: Decimal,
    /// Lots are rounded down to a multiple of this step.
    pub lot_step: Decimal,
}
