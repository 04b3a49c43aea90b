// In crates/execution/src/lib.rs

use async_trait::async_trait;
use core_types::{Side, Symbol};
use rust_decimal::Decimal;
pub mod error;
pub mod paper;
pub mod simulated;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use simulated::{BarOutcome, ExitReason, PositionState, PositionStateMachine};
pub use types::{OpenRequest, SimulationSettings};

/// The universal interface for a live order gateway.
///
/// A gateway turns trade intents into market orders at a broker and reports
/// whether the broker accepted them. The simulated backtest never goes through a
/// gateway; it is used by the live driver only.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// The name of the gateway (e.g. "PaperGateway").
    fn name(&self) -> &'static str;

    /// The side of the position this bot holds on `symbol`, if any.
    async fn open_side(&self, symbol: &Symbol, magic_number: u64) -> Result<Option<Side>>;

    /// Current account equity, used for risk-based lot sizing.
    async fn account_equity(&self) -> Result<Decimal>;

    /// Sends a market order with attached stop-loss and take-profit.
    ///
    /// Returns `Ok(false)` when the broker rejected the order.
    async fn open_position(&mut self, request: &OpenRequest) -> Result<bool>;

    /// Closes this bot's position on `symbol` at market.
    async fn close_position(&mut self, symbol: &Symbol, magic_number: u64) -> Result<bool>;
}
