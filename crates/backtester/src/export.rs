// In crates/backtester/src/export.rs

use std::path::Path;

use analytics::EquityPoint;
use chrono::{DateTime, Utc};
use core_types::{Side, Trade};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::Result;

/// One row of the trades CSV.
#[derive(Debug, Serialize)]
struct TradeRecord {
    side: &'static str,
    entry_time: DateTime<Utc>,
    entry_price: Decimal,
    exit_time: DateTime<Utc>,
    exit_price: Decimal,
    profit: Decimal,
    balance_after: Decimal,
}

impl From<&Trade> for TradeRecord {
    fn from(trade: &Trade) -> Self {
        Self {
            side: match trade.side {
                Side::Long => "LONG",
                Side::Short => "SHORT",
            },
            entry_time: trade.entry_time,
            entry_price: trade.entry_price,
            exit_time: trade.exit_time,
            exit_price: trade.exit_price,
            profit: trade.profit.round_dp(2),
            balance_after: trade.balance_after.round_dp(2),
        }
    }
}

/// Writes the trade log as CSV with a header row.
pub fn write_trades_csv(path: impl AsRef<Path>, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for trade in trades {
        writer.serialize(TradeRecord::from(trade))?;
    }
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), rows = trades.len(), "Trade log written.");
    Ok(())
}

/// Writes the equity curve as `timestamp,balance` CSV.
pub fn write_equity_csv(path: impl AsRef<Path>, curve: &[EquityPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["timestamp", "balance"])?;
    for point in curve {
        writer.write_record([point.timestamp.to_rfc3339(), point.value.round_dp(2).to_string()])?;
    }
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), points = curve.len(), "Equity curve written.");
    Ok(())
}
