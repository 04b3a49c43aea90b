// In crates/execution/src/simulated.rs

use crate::types::SimulationSettings;
use crate::Result;
use chrono::{DateTime, Utc};
use core_types::{Position, Side, Signal, Trade};
use rust_decimal::Decimal;

/// Coarse state of the simulated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Flat,
    Long,
    Short,
}

/// Why a simulated position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    CounterSignal,
}

/// What happened to the account while processing a single bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarOutcome {
    pub closed: Option<(Trade, ExitReason)>,
    pub opened: Option<Side>,
}

/// Simulated single-position trade lifecycle for one account and symbol.
///
/// Owns the open position, the account balance and the trade log. The balance
/// only changes inside `close`, together with the trade-log append.
#[derive(Debug)]
pub struct PositionStateMachine {
    settings: SimulationSettings,
    balance: Decimal,
    position: Option<Position>,
    trades: Vec<Trade>,
}

impl PositionStateMachine {
    pub fn new(settings: SimulationSettings, initial_balance: Decimal) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            balance: initial_balance,
            position: None,
            trades: Vec::new(),
        })
    }

    pub fn state(&self) -> PositionState {
        match self.position.as_ref().map(|p| p.side) {
            None => PositionState::Flat,
            Some(Side::Long) => PositionState::Long,
            Some(Side::Short) => PositionState::Short,
        }
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Consumes the machine, returning the balance, the trade log and any still-open position.
    pub fn into_parts(self) -> (Decimal, Vec<Trade>, Option<Position>) {
        (self.balance, self.trades, self.position)
    }

    /// Opens a position at `price`. Returns `false` without side effects if one is already open.
    pub fn open(&mut self, side: Side, price: Decimal, time: DateTime<Utc>) -> bool {
        if let Some(existing) = &self.position {
            tracing::debug!(?side, open_side = ?existing.side, "Open ignored: a position is already open.");
            return false;
        }

        let point = self.settings.point_size;
        let sl_distance = self.settings.stop_loss_pips * point;
        let tp_distance = self.settings.take_profit_pips * point;

        let (entry_price, stop_loss_price, take_profit_price) = match side {
            // Long entries pay the ask.
            Side::Long => {
                let entry = price + self.settings.spread_points * point;
                (entry, entry - sl_distance, entry + tp_distance)
            }
            // Short entries sell at the bid.
            Side::Short => (price, price + sl_distance, price - tp_distance),
        };

        tracing::info!(
            ?side,
            entry_price = %entry_price,
            stop_loss = %stop_loss_price,
            take_profit = %take_profit_price,
            "Simulated trade opened."
        );

        self.position = Some(Position {
            side,
            entry_price,
            entry_time: time,
            stop_loss_price,
            take_profit_price,
        });
        true
    }

    /// Closes the open position at `price`, books the profit and appends the trade.
    pub fn close(&mut self, price: Decimal, time: DateTime<Utc>) -> Option<Trade> {
        let position = self.position.take()?;

        let points = match position.side {
            Side::Long => (price - position.entry_price) / self.settings.point_size,
            Side::Short => (position.entry_price - price) / self.settings.point_size,
        };
        let profit = points * self.settings.lot_size - self.settings.commission;
        self.balance += profit;

        let trade = Trade {
            side: position.side,
            entry_time: position.entry_time,
            entry_price: position.entry_price,
            exit_time: time,
            exit_price: price,
            profit,
            balance_after: self.balance,
        };
        self.trades.push(trade.clone());

        tracing::info!(
            side = ?trade.side,
            exit_price = %price,
            profit = %profit.round_dp(2),
            balance = %self.balance.round_dp(2),
            "Simulated trade closed."
        );
        Some(trade)
    }

    /// The protective level breached by `price`, if any. Stop-loss is checked first.
    pub fn exit_level(&self, price: Decimal) -> Option<(Decimal, ExitReason)> {
        let position = self.position.as_ref()?;

        let stop_hit = match position.side {
            Side::Long => price <= position.stop_loss_price,
            Side::Short => price >= position.stop_loss_price,
        };
        if stop_hit {
            return Some((position.stop_loss_price, ExitReason::StopLoss));
        }

        let target_hit = match position.side {
            Side::Long => price >= position.take_profit_price,
            Side::Short => price <= position.take_profit_price,
        };
        target_hit.then_some((position.take_profit_price, ExitReason::TakeProfit))
    }

    /// Runs one bar through the exit and entry rules.
    ///
    /// A stop-loss or take-profit closure consumes the bar: neither the counter-signal
    /// exit nor a new entry is evaluated afterwards. A counter-signal exit does not
    /// consume the bar, so the opposite position can open at the same price.
    pub fn on_bar(&mut self, signal: Signal, price: Decimal, time: DateTime<Utc>) -> BarOutcome {
        let mut outcome = BarOutcome::default();

        // --- 1. Stop-loss / take-profit at the breached level ---
        if let Some((level, reason)) = self.exit_level(price) {
            outcome.closed = self.close(level, time).map(|trade| (trade, reason));
            return outcome;
        }

        // --- 2. Counter-signal exit at the bar price ---
        let countered = self
            .position
            .as_ref()
            .is_some_and(|p| p.side.is_countered_by(signal));
        if countered {
            outcome.closed = self
                .close(price, time)
                .map(|trade| (trade, ExitReason::CounterSignal));
        }

        // --- 3. Entry ---
        if self.position.is_none() {
            if let Some(side) = Side::from_signal(signal) {
                if self.open(side, price, time) {
                    outcome.opened = Some(side);
                }
            }
        }

        outcome
    }
}
