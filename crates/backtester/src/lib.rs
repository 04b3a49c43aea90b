pub mod error;
pub mod export;

use analytics::{AnalyticsEngine, PerformanceReport};
use core_types::{validate_series, Bar, Position, Trade};
use execution::{PositionStateMachine, SimulationSettings};
use rust_decimal::Decimal;
use strategies::ma_crossover::MACrossover;
use strategies::types::MACrossoverSettings;
use strategies::{SignalState, Strategy};

pub use error::{Error, Result};

/// Everything a finished backtest produced.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub final_balance: Decimal,
    pub trades: Vec<Trade>,
    /// A position still open after the last bar. It is not part of the balance or the trade log.
    pub open_position: Option<Position>,
    pub report: PerformanceReport,
}

/// The main engine for running historical backtests.
pub struct Backtester {
    /// A single strategy instance to test.
    pub strategy: Box<dyn Strategy + Send>,
    /// Instrument and cost parameters for the simulated fills.
    pub settings: SimulationSettings,
}

impl Backtester {
    pub fn new(strategy: Box<dyn Strategy + Send>, settings: SimulationSettings) -> Self {
        Self { strategy, settings }
    }

    /// Replays `bars` through the strategy and the simulated position lifecycle.
    ///
    /// Bar `i` is assessed on `bars[..i]` only and filled at its own close, so
    /// iteration starts at the strategy's warm-up length. Too few bars is not an
    /// error: the run simply has no iterations.
    pub fn run(&self, bars: &[Bar], initial_balance: Decimal) -> Result<BacktestResult> {
        validate_series(bars)?;
        let mut machine = PositionStateMachine::new(self.settings.clone(), initial_balance)?;
        let warmup = self.strategy.warmup_bars();

        tracing::info!(
            strategy = self.strategy.name(),
            bars = bars.len(),
            initial_balance = %initial_balance,
            "Starting backtest."
        );

        let mut state = SignalState::default();
        for i in warmup..bars.len() {
            let bar = &bars[i];
            let (signal, next_state) = self.strategy.assess(&bars[..i], state);
            state = next_state;

            let outcome = machine.on_bar(signal, bar.close, bar.timestamp);
            if let Some((_, reason)) = &outcome.closed {
                tracing::debug!(time = %bar.timestamp, ?reason, "Position closed.");
            }
        }

        let (final_balance, trades, open_position) = machine.into_parts();
        if let Some(position) = &open_position {
            tracing::info!(side = ?position.side, entry_price = %position.entry_price, "Position left open at end of data.");
        }

        let report = AnalyticsEngine::new().calculate(initial_balance, &trades);
        log_report(final_balance, &report);

        Ok(BacktestResult {
            final_balance,
            trades,
            open_position,
            report,
        })
    }
}

/// Runs a moving-average crossover backtest and returns the final balance and trade log.
pub fn run(
    bars: &[Bar],
    short_period: usize,
    long_period: usize,
    initial_balance: Decimal,
    settings: SimulationSettings,
) -> Result<(Decimal, Vec<Trade>)> {
    let strategy = MACrossover::new(MACrossoverSettings {
        short_period,
        long_period,
    })?;
    let result = Backtester::new(Box::new(strategy), settings).run(bars, initial_balance)?;
    Ok((result.final_balance, result.trades))
}

fn log_report(final_balance: Decimal, report: &PerformanceReport) {
    tracing::info!(
        final_balance = %final_balance.round_dp(2),
        total_trades = report.total_trades,
        total_return_pct = %format!("{:.2}", report.total_return_pct),
        win_rate_pct = %format!("{:.2}", report.win_rate_pct),
        max_drawdown_pct = %format!("{:.2}", report.max_drawdown_pct),
        "Backtest finished."
    );
}
