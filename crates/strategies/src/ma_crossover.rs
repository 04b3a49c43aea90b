// In crates/strategies/src/ma_crossover.rs

use crate::types::MACrossoverSettings;
use crate::{Error, Result, SignalState, Strategy};
use core_types::{Bar, Signal};
use num_traits::cast::ToPrimitive;
use ta::indicators::SimpleMovingAverage as Sma;
use ta::Next;

/// Simple moving average crossover on bar closes.
///
/// Emits `Buy` when the short SMA crosses above the long SMA between the two most
/// recent window positions and `Sell` on the reverse cross. Repeated signals in the
/// same direction are suppressed through the caller-supplied `SignalState`.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
    // Unfed indicator templates, cloned for every assessment.
    short_sma: Sma,
    long_sma: Sma,
}

impl MACrossover {
    /// Creates a new `MACrossover` strategy instance from its settings.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        if settings.short_period == 0 {
            return Err(Error::InvalidSettings(
                "short_period must be at least 1".to_string(),
            ));
        }
        if settings.short_period >= settings.long_period {
            return Err(Error::InvalidSettings(format!(
                "short_period ({}) must be less than long_period ({})",
                settings.short_period, settings.long_period
            )));
        }

        let short_sma = Sma::new(settings.short_period)
            .map_err(|e| Error::InvalidSettings(format!("{:?}", e)))?;
        let long_sma = Sma::new(settings.long_period)
            .map_err(|e| Error::InvalidSettings(format!("{:?}", e)))?;

        Ok(Self {
            settings,
            short_sma,
            long_sma,
        })
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }

    /// Detects a crossover at the end of the window, before de-duplication.
    fn detect(&self, klines: &[Bar]) -> Signal {
        let long_period = self.settings.long_period;
        if klines.len() < long_period {
            return Signal::Hold; // Not enough data yet.
        }

        // The last two SMA values only depend on the trailing `long_period + 1` closes.
        let tail = &klines[klines.len().saturating_sub(long_period + 1)..];
        let closes: Vec<f64> = tail
            .iter()
            .map(|k| k.close.to_f64().unwrap_or(f64::NAN))
            .collect();

        let short_ma = rolling_mean(self.short_sma.clone(), self.settings.short_period, &closes);
        let long_ma = rolling_mean(self.long_sma.clone(), long_period, &closes);

        let n = closes.len();
        let (Some(prev_short), Some(prev_long), Some(cur_short), Some(cur_long)) =
            (short_ma[n - 2], long_ma[n - 2], short_ma[n - 1], long_ma[n - 1])
        else {
            // The previous position sits inside the warm-up window.
            return Signal::Hold;
        };

        if prev_short < prev_long && cur_short > cur_long {
            Signal::Buy
        } else if prev_short > prev_long && cur_short < cur_long {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

/// Feeds `closes` through an SMA, masking positions where the window is not yet full.
fn rolling_mean(mut sma: Sma, period: usize, closes: &[f64]) -> Vec<Option<f64>> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let value = sma.next(*close);
            (i + 1 >= period).then_some(value)
        })
        .collect()
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MovingAverageCrossover"
    }

    fn warmup_bars(&self) -> usize {
        self.settings.long_period
    }

    fn assess(&self, klines: &[Bar], state: SignalState) -> (Signal, SignalState) {
        let detected = self.detect(klines);
        let (signal, next_state) = state.emit(detected);
        if detected != signal {
            tracing::debug!(%detected, "Repeated crossover suppressed.");
        }
        (signal, next_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;

    fn bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let close = Decimal::from_f64(*c).unwrap();
                Bar {
                    timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 900, 0).unwrap(),
                    open: close,
                    high: close,
                    low: close,
                    close,
                }
            })
            .collect()
    }

    fn strategy(short_period: usize, long_period: usize) -> MACrossover {
        MACrossover::new(MACrossoverSettings { short_period, long_period }).unwrap()
    }

    #[test]
    fn rejects_inverted_periods() {
        let result = MACrossover::new(MACrossoverSettings { short_period: 5, long_period: 5 });
        assert!(matches!(result, Err(Error::InvalidSettings(_))));
        let result = MACrossover::new(MACrossoverSettings { short_period: 0, long_period: 5 });
        assert!(matches!(result, Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn short_window_holds() {
        let s = strategy(2, 3);
        let (signal, state) = s.assess(&bars(&[10.0, 9.0]), SignalState::default());
        assert_eq!(signal, Signal::Hold);
        assert_eq!(state, SignalState::default());
    }

    #[test]
    fn undefined_previous_average_holds() {
        // With exactly `long_period` bars the previous long SMA is not formed yet,
        // even though the current averages already cross.
        let s = strategy(2, 3);
        let (signal, _) = s.assess(&bars(&[10.0, 7.0, 12.0]), SignalState::default());
        assert_eq!(signal, Signal::Hold);
    }

    #[test]
    fn golden_cross_buys() {
        // prev: short 8.5 < long 9.0, cur: short 10.0 > long 9.67
        let s = strategy(2, 3);
        let (signal, state) = s.assess(&bars(&[10.0, 9.0, 8.0, 12.0]), SignalState::default());
        assert_eq!(signal, Signal::Buy);
        assert_eq!(state.last_signal, Some(Signal::Buy));
    }

    #[test]
    fn death_cross_sells() {
        // prev: short 9.5 > long 9.0, cur: short 8.0 < long 8.33
        let s = strategy(2, 3);
        let (signal, _) = s.assess(&bars(&[8.0, 9.0, 10.0, 6.0]), SignalState::default());
        assert_eq!(signal, Signal::Sell);
    }

    #[test]
    fn repeated_buy_is_suppressed() {
        let s = strategy(2, 3);
        let state = SignalState { last_signal: Some(Signal::Buy) };
        let (signal, next) = s.assess(&bars(&[10.0, 9.0, 8.0, 12.0]), state);
        assert_eq!(signal, Signal::Hold);
        assert_eq!(next, state);
    }

    #[test]
    fn buy_after_sell_is_emitted() {
        let s = strategy(2, 3);
        let state = SignalState { last_signal: Some(Signal::Sell) };
        let (signal, next) = s.assess(&bars(&[10.0, 9.0, 8.0, 12.0]), state);
        assert_eq!(signal, Signal::Buy);
        assert_eq!(next.last_signal, Some(Signal::Buy));
    }

    #[test]
    fn long_history_only_uses_the_tail() {
        let s = strategy(2, 3);
        let mut closes = vec![50.0; 40];
        closes.extend_from_slice(&[10.0, 9.0, 8.0, 12.0]);
        let (signal, _) = s.assess(&bars(&closes), SignalState::default());
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn rising_series_never_sells() {
        let s = strategy(3, 5);
        let closes: Vec<f64> = (0..=10).map(|i| 100.0 + i as f64).collect();
        let series = bars(&closes);

        let mut state = SignalState::default();
        let mut emitted = Vec::new();
        for end in 1..=series.len() {
            let (signal, next) = s.assess(&series[..end], state);
            state = next;
            if signal != Signal::Hold {
                emitted.push(signal);
            }
        }
        assert!(!emitted.contains(&Signal::Sell));
        if let Some(first) = emitted.first() {
            assert_eq!(*first, Signal::Buy);
        }
    }

    #[test]
    fn window_is_not_mutated() {
        let s = strategy(2, 3);
        let series = bars(&[10.0, 9.0, 8.0, 12.0]);
        let before = series.clone();
        let _ = s.assess(&series, SignalState::default());
        assert_eq!(series, before);
    }
}
