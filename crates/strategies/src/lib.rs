// In crates/strategies/src/lib.rs

use core_types::{Bar, Signal};
pub mod error;
pub mod factory;
pub mod ma_crossover;
pub mod types;

pub use error::{Error, Result};
pub use factory::StrategyKind;

/// The prior-signal memory a strategy needs between calls.
///
/// Strategies never hold this themselves. The caller threads it through
/// successive `assess` calls, which keeps `assess` a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalState {
    /// The last non-`Hold` signal that was actually emitted.
    pub last_signal: Option<Signal>,
}

impl SignalState {
    /// Applies de-duplication to a freshly detected signal.
    ///
    /// A `Buy` or `Sell` identical to the last emitted one is suppressed to `Hold`.
    /// The state only changes when a signal is emitted.
    pub fn emit(self, detected: Signal) -> (Signal, SignalState) {
        match detected {
            Signal::Hold => (Signal::Hold, self),
            s if self.last_signal == Some(s) => (Signal::Hold, self),
            s => (s, SignalState { last_signal: Some(s) }),
        }
    }
}

/// The universal interface for a trading strategy.
///
/// A strategy analyzes a read-only window of bars (oldest first) and produces a
/// `Signal` together with the updated `SignalState`.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Number of bars required before the strategy can produce anything but `Hold`.
    fn warmup_bars(&self) -> usize;

    fn assess(&self, klines: &[Bar], state: SignalState) -> (Signal, SignalState);
}
