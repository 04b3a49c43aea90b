use chrono::{TimeZone, Utc};
use core_types::{Side, Trade};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn trades(initial: Decimal, profits: &[i64]) -> Vec<Trade> {
    let mut balance = initial;
    profits
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let profit = Decimal::new(*p, 2);
            balance += profit;
            let time = Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap();
            Trade {
                side: Side::Short,
                entry_time: time,
                entry_price: Decimal::ONE,
                exit_time: time,
                exit_price: Decimal::ONE,
                profit,
                balance_after: balance,
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn percentages_stay_in_range(profits in prop::collection::vec(-50_000i64..50_000, 0..100)) {
        let initial = Decimal::from(10_000);
        let report = analytics::calculate_metrics(&trades(initial, &profits), initial);

        prop_assert!((0.0..=100.0).contains(&report.win_rate_pct));
        prop_assert!((0.0..=100.0).contains(&report.max_drawdown_pct));
        prop_assert_eq!(report.total_trades as usize, profits.len());
    }

    #[test]
    fn only_winners_never_draw_down(profits in prop::collection::vec(1i64..10_000, 1..50)) {
        let initial = Decimal::from(10_000);
        let report = analytics::calculate_metrics(&trades(initial, &profits), initial);

        prop_assert_eq!(report.max_drawdown_pct, 0.0);
        prop_assert_eq!(report.win_rate_pct, 100.0);
        prop_assert!(report.total_return_pct > 0.0);
    }
}
