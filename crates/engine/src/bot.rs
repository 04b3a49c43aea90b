// In crates/engine/src/bot.rs

use std::time::Duration;

use core_types::{Side, Signal, Symbol};
use execution::{OpenRequest, OrderGateway};
use risk::LotSizer;
use rust_decimal::Decimal;
use strategies::{SignalState, Strategy, StrategyKind};

use crate::data::MarketDataSource;
use crate::Result;

/// Static parameters of a live bot.
#[derive(Debug, Clone)]
pub struct LiveSettings {
    pub symbol: Symbol,
    pub timeframe: String,
    pub magic_number: u64,
    pub stop_loss_pips: Decimal,
    pub take_profit_pips: Decimal,
    pub poll_interval: Duration,
    /// Bars fetched per cycle beyond the strategy's warm-up length.
    pub history_padding: usize,
}

/// What a single polling cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The data source had nothing; the cycle was skipped.
    NoData,
    Decided {
        signal: Signal,
        closed: Option<Side>,
        opened: Option<Side>,
    },
}

/// A polling trading bot for one symbol, driven by a strategy and an order gateway.
pub struct LiveBot {
    /// A unique identifier for this bot instance (e.g., "EURUSD_M15_MovingAverageCrossover").
    pub id: String,
    settings: LiveSettings,
    strategy: StrategyKind,
    state: SignalState,
    data: Box<dyn MarketDataSource>,
    gateway: Box<dyn OrderGateway>,
    sizer: Box<dyn LotSizer>,
}

impl LiveBot {
    pub fn new(
        settings: LiveSettings,
        strategy: StrategyKind,
        data: Box<dyn MarketDataSource>,
        gateway: Box<dyn OrderGateway>,
        sizer: Box<dyn LotSizer>,
    ) -> Self {
        let id = format!("{}_{}_{}", settings.symbol, settings.timeframe, strategy.name());
        tracing::info!(id = %id, gateway = gateway.name(), sizer = sizer.name(), "Creating new bot instance.");

        Self {
            id,
            settings,
            strategy,
            state: SignalState::default(),
            data,
            gateway,
            sizer,
        }
    }

    pub fn gateway(&self) -> &dyn OrderGateway {
        self.gateway.as_ref()
    }

    /// Runs one poll: fetch bars, decide, and send at most one close and one open.
    ///
    /// The position side is read once at the start of the cycle. A counter-signal
    /// closes the position, and the reversal waits for the next cycle.
    pub async fn run_once(&mut self) -> Result<CycleOutcome> {
        let s = &self.settings;
        let count = self.strategy.warmup_bars() + s.history_padding;

        let bars = match self.data.latest_bars(&s.symbol, &s.timeframe, count).await? {
            Some(bars) if !bars.is_empty() => bars,
            _ => {
                tracing::warn!(id = %self.id, "No bar data available, skipping cycle.");
                return Ok(CycleOutcome::NoData);
            }
        };

        let (signal, next_state) = self.strategy.assess(&bars, self.state);
        self.state = next_state;

        let current = self.gateway.open_side(&s.symbol, s.magic_number).await?;
        tracing::info!(id = %self.id, %signal, position = ?current, "Cycle decision.");

        let mut closed = None;
        if let Some(side) = current.filter(|side| side.is_countered_by(signal)) {
            if self.gateway.close_position(&s.symbol, s.magic_number).await? {
                closed = Some(side);
            } else {
                tracing::warn!(id = %self.id, ?side, "Close order was not accepted.");
            }
        }

        let mut opened = None;
        if let (None, Some(side)) = (current, Side::from_signal(signal)) {
            let equity = self.gateway.account_equity().await?;
            let lot_size = self.sizer.lot_size(equity)?;
            let request = OpenRequest {
                symbol: s.symbol.clone(),
                side,
                lot_size,
                stop_loss_pips: s.stop_loss_pips,
                take_profit_pips: s.take_profit_pips,
                magic_number: s.magic_number,
            };
            if self.gateway.open_position(&request).await? {
                opened = Some(side);
            } else {
                tracing::warn!(id = %self.id, ?side, lot_size = %lot_size, "Open order was not accepted.");
            }
        }

        Ok(CycleOutcome::Decided {
            signal,
            closed,
            opened,
        })
    }

    /// The main polling loop. Stops on Ctrl-C or after `max_cycles` cycles.
    ///
    /// A failed cycle is logged and the loop carries on with the next poll.
    pub async fn run(&mut self, max_cycles: Option<u64>) -> Result<()> {
        tracing::info!(
            id = %self.id,
            poll_secs = self.settings.poll_interval.as_secs(),
            "Starting live bot."
        );

        let mut cycles = 0u64;
        loop {
            if let Err(e) = self.run_once().await {
                tracing::error!(id = %self.id, error = %e, "Cycle failed.");
            }
            cycles += 1;
            if max_cycles.is_some_and(|max| cycles >= max) {
                tracing::info!(id = %self.id, cycles, "Cycle limit reached.");
                break;
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(id = %self.id, "Shutdown signal received.");
                    break;
                }
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }

        tracing::info!(id = %self.id, cycles, "Live bot stopped.");
        Ok(())
    }
}
