use analytics::equity_curve;
use backtester::export::{write_equity_csv, write_trades_csv};
use chrono::{TimeZone, Utc};
use core_types::{Side, Trade};
use rust_decimal_macros::dec;

fn sample_trades() -> Vec<Trade> {
    let t = |s| Utc.timestamp_opt(s, 0).unwrap();
    vec![
        Trade {
            side: Side::Long,
            entry_time: t(1_700_000_000),
            entry_price: dec!(1.10002),
            exit_time: t(1_700_000_900),
            exit_price: dec!(1.10102),
            profit: dec!(-1),
            balance_after: dec!(9999),
        },
        Trade {
            side: Side::Short,
            entry_time: t(1_700_001_800),
            entry_price: dec!(1.1),
            exit_time: t(1_700_002_700),
            exit_price: dec!(1.099),
            profit: dec!(-1),
            balance_after: dec!(9998),
        },
    ]
}

#[test]
fn trades_csv_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");
    write_trades_csv(&path, &sample_trades()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "side,entry_time,entry_price,exit_time,exit_price,profit,balance_after"
    );
    assert!(lines[1].starts_with("LONG,"));
    assert!(lines[2].starts_with("SHORT,"));
    assert!(lines[2].ends_with(",9998"));
}

#[test]
fn equity_csv_follows_trade_exits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("equity.csv");
    write_equity_csv(&path, &equity_curve(&sample_trades())).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["timestamp", "balance"]);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][1], "9998");
}

#[test]
fn empty_trade_log_writes_nothing_but_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");
    write_trades_csv(&path, &[]).unwrap();
    assert!(path.exists());
}
