//! Property tests for the simulated position lifecycle.
//!
//! 1. Balance accounting: balance equals the initial balance plus booked profits,
//!    and every trade records the balance right after it.
//! 2. Bar consumption: a stop-loss or take-profit exit never opens a position on the same bar.
//! 3. Exit prices: protective exits fill at the stored level, not at the bar price.

use chrono::{DateTime, TimeZone, Utc};
use core_types::{Signal, Trade};
use execution::{ExitReason, PositionState, PositionStateMachine, SimulationSettings};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn settings() -> SimulationSettings {
    SimulationSettings {
        point_size: dec!(0.01),
        spread_points: dec!(2),
        stop_loss_pips: dec!(50),
        take_profit_pips: dec!(100),
        lot_size: dec!(1),
        commission: dec!(2),
    }
}

fn arb_signal() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::Buy), Just(Signal::Sell), Just(Signal::Hold)]
}

// Prices in hundredths around 100.00, wide enough to hit both stops and targets.
fn arb_bars() -> impl Strategy<Value = Vec<(Signal, i64)>> {
    prop::collection::vec((arb_signal(), 9_700i64..10_300), 1..200)
}

fn time(i: usize) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + i as i64 * 900, 0).unwrap()
}

proptest! {
    #[test]
    fn balance_matches_trade_log(bars in arb_bars()) {
        let initial = dec!(10000);
        let mut machine = PositionStateMachine::new(settings(), initial).unwrap();
        for (i, (signal, cents)) in bars.iter().enumerate() {
            machine.on_bar(*signal, Decimal::new(*cents, 2), time(i));
        }

        let trades: &[Trade] = machine.trades();
        let booked: Decimal = trades.iter().map(|t| t.profit).sum();
        prop_assert_eq!(machine.balance(), initial + booked);

        let mut running = initial;
        for trade in trades {
            running += trade.profit;
            prop_assert_eq!(trade.balance_after, running);
            prop_assert!(trade.exit_time >= trade.entry_time);
        }
    }

    #[test]
    fn protective_exit_consumes_the_bar(bars in arb_bars()) {
        let mut machine = PositionStateMachine::new(settings(), dec!(10000)).unwrap();
        for (i, (signal, cents)) in bars.iter().enumerate() {
            let price = Decimal::new(*cents, 2);
            let levels = machine
                .position()
                .map(|p| (p.stop_loss_price, p.take_profit_price));

            let outcome = machine.on_bar(*signal, price, time(i));

            if let Some((trade, reason)) = &outcome.closed {
                match reason {
                    ExitReason::StopLoss | ExitReason::TakeProfit => {
                        prop_assert_eq!(outcome.opened, None);
                        prop_assert_eq!(machine.state(), PositionState::Flat);
                        let (sl, tp) = levels.unwrap();
                        let expected = if *reason == ExitReason::StopLoss { sl } else { tp };
                        prop_assert_eq!(trade.exit_price, expected);
                    }
                    ExitReason::CounterSignal => {
                        prop_assert_eq!(trade.exit_price, price);
                    }
                }
            }
        }
    }
}
