// In crates/core-types/src/types.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The instrument a bot trades, e.g. `Symbol("EURUSD".into())`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One OHLC price observation for a fixed interval.
///
/// Bars are produced oldest-to-newest by a data source and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// Checks that a bar series is ordered by strictly increasing timestamp.
pub fn validate_series(bars: &[Bar]) -> Result<()> {
    match bars
        .windows(2)
        .position(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        Some(i) => Err(Error::NonIncreasingTimestamp { index: i + 1 }),
        None => Ok(()),
    }
}

/// A trading decision derived from a window of bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// The direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// The side a signal would open. `Hold` opens nothing.
    pub fn from_signal(signal: Signal) -> Option<Side> {
        match signal {
            Signal::Buy => Some(Side::Long),
            Signal::Sell => Some(Side::Short),
            Signal::Hold => None,
        }
    }

    /// True when `signal` asks for the opposite direction of this side.
    pub fn is_countered_by(self, signal: Signal) -> bool {
        matches!(
            (self, signal),
            (Side::Long, Signal::Sell) | (Side::Short, Signal::Buy)
        )
    }
}

/// The single open position held by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub side: Side,
    pub entry_price: Decimal,
    pub entry_time: DateTime<Utc>,
    pub stop_loss_price: Decimal,
    pub take_profit_price: Decimal,
}

/// A closed round trip. Appended to the trade log once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub exit_time: DateTime<Utc>,
    pub exit_price: Decimal,
    pub profit: Decimal,
    pub balance_after: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn bar_at(secs: i64) -> Bar {
        Bar {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            open: dec!(1.1),
            high: dec!(1.2),
            low: dec!(1.0),
            close: dec!(1.1),
        }
    }

    #[test]
    fn increasing_series_is_valid() {
        let bars: Vec<Bar> = (0..5).map(|i| bar_at(i * 900)).collect();
        assert_eq!(validate_series(&bars), Ok(()));
        assert_eq!(validate_series(&[]), Ok(()));
    }

    #[test]
    fn duplicate_timestamp_is_rejected() {
        let bars = vec![bar_at(0), bar_at(900), bar_at(900)];
        assert_eq!(
            validate_series(&bars),
            Err(Error::NonIncreasingTimestamp { index: 2 })
        );
    }

    #[test]
    fn side_mapping() {
        assert_eq!(Side::from_signal(Signal::Buy), Some(Side::Long));
        assert_eq!(Side::from_signal(Signal::Sell), Some(Side::Short));
        assert_eq!(Side::from_signal(Signal::Hold), None);
        assert!(Side::Long.is_countered_by(Signal::Sell));
        assert!(Side::Short.is_countered_by(Signal::Buy));
        assert!(!Side::Long.is_countered_by(Signal::Buy));
        assert!(!Side::Short.is_countered_by(Signal::Hold));
    }
}
