// In crates/execution/src/paper.rs

use crate::{OpenRequest, OrderGateway, Result};
use async_trait::async_trait;
use core_types::{Side, Symbol};
use rust_decimal::Decimal;

/// An in-process gateway for dry runs.
///
/// It remembers at most one open position per symbol and magic number, accepts
/// every order and never moves the account equity.
#[derive(Debug, Clone)]
pub struct PaperGateway {
    equity: Decimal,
    open: Option<(Symbol, u64, Side)>,
    orders_sent: usize,
}

impl PaperGateway {
    pub fn new(equity: Decimal) -> Self {
        Self {
            equity,
            open: None,
            orders_sent: 0,
        }
    }

    /// Number of open and close orders accepted so far.
    pub fn orders_sent(&self) -> usize {
        self.orders_sent
    }
}

#[async_trait]
impl OrderGateway for PaperGateway {
    fn name(&self) -> &'static str {
        "PaperGateway"
    }

    async fn open_side(&self, symbol: &Symbol, magic_number: u64) -> Result<Option<Side>> {
        Ok(self
            .open
            .as_ref()
            .filter(|(s, magic, _)| s == symbol && *magic == magic_number)
            .map(|(_, _, side)| *side))
    }

    async fn account_equity(&self) -> Result<Decimal> {
        Ok(self.equity)
    }

    async fn open_position(&mut self, request: &OpenRequest) -> Result<bool> {
        if self.open.is_some() {
            tracing::warn!(symbol = %request.symbol, "Paper order rejected: a position is already open.");
            return Ok(false);
        }
        tracing::info!(
            symbol = %request.symbol,
            side = ?request.side,
            lot_size = %request.lot_size,
            sl_pips = %request.stop_loss_pips,
            tp_pips = %request.take_profit_pips,
            magic = request.magic_number,
            "Paper order filled."
        );
        self.open = Some((request.symbol.clone(), request.magic_number, request.side));
        self.orders_sent += 1;
        Ok(true)
    }

    async fn close_position(&mut self, symbol: &Symbol, magic_number: u64) -> Result<bool> {
        if self.open_side(symbol, magic_number).await?.is_none() {
            return Ok(false);
        }
        tracing::info!(symbol = %symbol, magic = magic_number, "Paper position closed.");
        self.open = None;
        self.orders_sent += 1;
        Ok(true)
    }
}
