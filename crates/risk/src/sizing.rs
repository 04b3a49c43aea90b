// In crates/risk/src/sizing.rs

use crate::types::RiskSettings;
use crate::{Error, LotSizer, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Always trades the configured lot. Used by backtests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLot(Decimal);

impl FixedLot {
    pub fn new(lot_size: Decimal) -> Result<Self> {
        if lot_size <= Decimal::ZERO {
            return Err(Error::InvalidParameters(format!(
                "lot_size must be positive, got {}",
                lot_size
            )));
        }
        Ok(Self(lot_size))
    }
}

impl LotSizer for FixedLot {
    fn name(&self) -> &'static str {
        "FixedLot"
    }

    fn lot_size(&self, _equity: Decimal) -> Result<Decimal> {
        Ok(self.0)
    }
}

/// Sizes positions so that hitting the stop-loss loses a fixed share of equity.
///
/// `lot = equity * risk% / (stop_loss_pips * point_value_per_lot)`, rounded down to
/// `lot_step` and clamped to `[min_lot, max_lot]`.
#[derive(Debug, Clone)]
pub struct RiskBasedLot {
    settings: RiskSettings,
}

impl RiskBasedLot {
    pub fn new(settings: RiskSettings) -> Result<Self> {
        let positive = [
            ("risk_per_trade_percent", settings.risk_per_trade_percent),
            ("stop_loss_pips", settings.stop_loss_pips),
            ("point_value_per_lot", settings.point_value_per_lot),
            ("min_lot", settings.min_lot),
            ("lot_step", settings.lot_step),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(Error::InvalidParameters(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
        if settings.max_lot < settings.min_lot {
            return Err(Error::InvalidParameters(
                "max_lot must not be below min_lot".to_string(),
            ));
        }
        Ok(Self { settings })
    }
}

impl LotSizer for RiskBasedLot {
    fn name(&self) -> &'static str {
        "RiskBasedLot"
    }

    fn lot_size(&self, equity: Decimal) -> Result<Decimal> {
        if equity <= Decimal::ZERO {
            return Err(Error::NonPositiveEquity(equity.to_string()));
        }
        let s = &self.settings;

        let amount_to_risk = equity * s.risk_per_trade_percent / dec!(100);
        let raw = amount_to_risk / (s.stop_loss_pips * s.point_value_per_lot);
        let stepped = (raw / s.lot_step).floor() * s.lot_step;

        Ok(stepped.clamp(s.min_lot, s.max_lot))
    }
}
