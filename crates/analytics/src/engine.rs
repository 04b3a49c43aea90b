use crate::types::{EquityPoint, PerformanceReport};
use core_types::Trade;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// The engine responsible for calculating performance metrics from trade data.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the performance report of a run from its closed trades.
    ///
    /// An empty trade list yields a report with every metric at zero.
    pub fn calculate(&self, initial_balance: Decimal, trades: &[Trade]) -> PerformanceReport {
        let mut report = PerformanceReport::new();
        let Some(last) = trades.last() else {
            return report;
        };

        report.total_trades = trades.len() as u32;
        report.net_pnl = trades.iter().map(|t| t.profit).sum();

        // 1. Total return against the starting balance.
        if !initial_balance.is_zero() {
            report.total_return_pct =
                percent((last.balance_after - initial_balance) / initial_balance);
        }

        // 2. Win rate: strictly positive profits only, break-even counts as a loss.
        let winners = trades.iter().filter(|t| t.profit > dec!(0)).count();
        report.win_rate_pct = percent(Decimal::from(winners) / Decimal::from(trades.len()));

        // 3. Max drawdown over the post-trade balances.
        report.max_drawdown_pct = max_drawdown_pct(trades.iter().map(|t| t.balance_after));

        report
    }
}

/// Convenience wrapper around [`AnalyticsEngine::calculate`].
pub fn calculate_metrics(trades: &[Trade], initial_balance: Decimal) -> PerformanceReport {
    AnalyticsEngine::new().calculate(initial_balance, trades)
}

/// The balance after each trade, stamped with the trade's exit time.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    trades
        .iter()
        .map(|t| EquityPoint {
            timestamp: t.exit_time,
            value: t.balance_after,
        })
        .collect()
}

/// Largest `(running_max - balance) / running_max`, in percent.
///
/// The running maximum includes the current point. Points whose running maximum is
/// not positive are skipped since the ratio is undefined there.
fn max_drawdown_pct(balances: impl Iterator<Item = Decimal>) -> f64 {
    let mut running_max: Option<Decimal> = None;
    let mut max_drawdown = Decimal::ZERO;

    for balance in balances {
        let peak = running_max.map_or(balance, |m| m.max(balance));
        running_max = Some(peak);
        if peak > Decimal::ZERO {
            max_drawdown = max_drawdown.max((peak - balance) / peak);
        }
    }

    percent(max_drawdown)
}

fn percent(ratio: Decimal) -> f64 {
    (ratio * dec!(100)).to_f64().unwrap_or(0.0)
}
