// In app/src/main.rs

use std::path::PathBuf;
use std::time::Duration;

use analytics::PerformanceReport;
use anyhow::{Context, Result};
use app_config::{LiveTradingSettings, Settings, TradingSettings};
use backtester::export::{write_equity_csv, write_trades_csv};
use backtester::Backtester;
use clap::{Parser, Subcommand};
use core_types::Symbol;
use engine::{CsvDataSource, LiveBot, LiveSettings};
use execution::paper::PaperGateway;
use execution::SimulationSettings;
use risk::{FixedLot, LotSizer, RiskBasedLot, RiskSettings};
use rust_decimal::prelude::*;
use strategies::StrategyKind;

mod logging;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A moving-average crossover trading bot for a single symbol.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a historical backtest over a bar CSV file.
    Backtest {
        /// Bar file with `time,open,high,low,close` rows. Defaults to `backtest.data_path`.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Where to write the trade log CSV. Defaults to `backtest.trades_out`.
        #[arg(long)]
        trades_out: Option<PathBuf>,

        /// Where to write the equity curve CSV. Defaults to `backtest.equity_out`.
        #[arg(long)]
        equity_out: Option<PathBuf>,
    },

    /// Runs the polling bot in paper mode, replaying a bar CSV file as the live feed.
    Live {
        /// Bar file to replay. Defaults to `backtest.data_path`.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Stop after this many polling cycles instead of waiting for Ctrl-C.
        #[arg(long)]
        max_cycles: Option<u64>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings().context("failed to load configuration")?;
    let _log_guard = logging::init(&settings.app)?;

    tracing::info!(
        symbol = %settings.trading.symbol,
        timeframe = %settings.trading.timeframe,
        strategy = %settings.strategy.name,
        "Starting atlas-ma"
    );

    match cli.command {
        Commands::Backtest {
            data,
            trades_out,
            equity_out,
        } => handle_backtest(&settings, data, trades_out, equity_out),
        Commands::Live { data, max_cycles } => handle_live(&settings, data, max_cycles).await,
    }
}

fn handle_backtest(
    settings: &Settings,
    data: Option<PathBuf>,
    trades_out: Option<PathBuf>,
    equity_out: Option<PathBuf>,
) -> Result<()> {
    let data = data.unwrap_or_else(|| PathBuf::from(&settings.backtest.data_path));
    let bars = engine::load_bars(&data)
        .with_context(|| format!("failed to load bars from {}", data.display()))?;

    let strategy = StrategyKind::from_config(&settings.strategy)?;
    let initial_balance = decimal("backtest.initial_balance", settings.backtest.initial_balance)?;
    let sim = simulation_settings(&settings.trading, initial_balance)?;

    let result = Backtester::new(Box::new(strategy), sim).run(&bars, initial_balance)?;
    print_report(initial_balance, result.final_balance, &result.report);

    let trades_out = trades_out.or_else(|| settings.backtest.trades_out.as_ref().map(PathBuf::from));
    if let Some(path) = trades_out {
        write_trades_csv(&path, &result.trades)?;
    }
    let equity_out = equity_out.or_else(|| settings.backtest.equity_out.as_ref().map(PathBuf::from));
    if let Some(path) = equity_out {
        write_equity_csv(&path, &analytics::equity_curve(&result.trades))?;
    }

    Ok(())
}

async fn handle_live(settings: &Settings, data: Option<PathBuf>, max_cycles: Option<u64>) -> Result<()> {
    let data = data.unwrap_or_else(|| PathBuf::from(&settings.backtest.data_path));
    let source = CsvDataSource::from_path(&data)
        .with_context(|| format!("failed to load bars from {}", data.display()))?
        .replay();

    let strategy = StrategyKind::from_config(&settings.strategy)?;
    let gateway = PaperGateway::new(decimal("live.paper_equity", settings.live.paper_equity)?);
    let sizer = RiskBasedLot::new(risk_settings(&settings.trading, &settings.live)?)?;

    let t = &settings.trading;
    let live_settings = LiveSettings {
        symbol: Symbol(t.symbol.clone()),
        timeframe: t.timeframe.clone(),
        magic_number: t.magic_number,
        stop_loss_pips: decimal("trading.stop_loss_pips", t.stop_loss_pips)?,
        take_profit_pips: decimal("trading.take_profit_pips", t.take_profit_pips)?,
        poll_interval: Duration::from_secs(settings.live.poll_interval_secs),
        history_padding: settings.live.history_padding,
    };

    let mut bot = LiveBot::new(
        live_settings,
        strategy,
        Box::new(source),
        Box::new(gateway),
        Box::new(sizer),
    );
    bot.run(max_cycles).await?;
    Ok(())
}

fn decimal(name: &str, value: f64) -> Result<Decimal> {
    Decimal::from_f64(value).with_context(|| format!("{} is not a representable number: {}", name, value))
}

/// Backtests trade a fixed lot, validated through the same sizer interface as live runs.
fn simulation_settings(t: &TradingSettings, initial_balance: Decimal) -> Result<SimulationSettings> {
    let lot = FixedLot::new(decimal("trading.lot_size", t.lot_size)?)?;
    Ok(SimulationSettings {
        point_size: decimal("trading.point_size", t.point_size)?,
        spread_points: decimal("trading.spread_points", t.spread_points)?,
        stop_loss_pips: decimal("trading.stop_loss_pips", t.stop_loss_pips)?,
        take_profit_pips: decimal("trading.take_profit_pips", t.take_profit_pips)?,
        lot_size: lot.lot_size(initial_balance)?,
        commission: decimal("trading.commission", t.commission)?,
    })
}

fn risk_settings(t: &TradingSettings, live: &LiveTradingSettings) -> Result<RiskSettings> {
    Ok(RiskSettings {
        risk_per_trade_percent: decimal("live.risk_per_trade_percent", live.risk_per_trade_percent)?,
        stop_loss_pips: decimal("trading.stop_loss_pips", t.stop_loss_pips)?,
        point_value_per_lot: decimal("live.point_value_per_lot", live.point_value_per_lot)?,
        min_lot: decimal("live.min_lot", live.min_lot)?,
        max_lot: decimal("live.max_lot", live.max_lot)?,
        lot_step: decimal("live.lot_step", live.lot_step)?,
    })
}

/// Helper function to print the performance report in a readable format.
fn print_report(initial_balance: Decimal, final_balance: Decimal, report: &PerformanceReport) {
    println!("\n--- Backtest Performance Report ---");
    println!("-----------------------------------");
    println!("Initial Balance:       {:.2}", initial_balance);
    println!("Final Balance:         {:.2}", final_balance);
    println!("Net P&L:               {:.2}", report.net_pnl);
    println!("Total Return:          {:.2}%", report.total_return_pct);
    println!("Win Rate:              {:.2}%", report.win_rate_pct);
    println!("Max Drawdown:          {:.2}%", report.max_drawdown_pct);
    println!("Total Trades:          {}", report.total_trades);
    println!("-----------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trading_settings_convert_exactly() {
        let sim = simulation_settings(&TradingSettings::default(), Decimal::from(10_000)).unwrap();
        assert_eq!(sim.point_size, Decimal::new(1, 5));
        assert_eq!(sim.lot_size, Decimal::new(1, 2));
        assert_eq!(sim.stop_loss_pips, Decimal::from(50));
        assert_eq!(sim.commission, Decimal::from(2));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(decimal("x", f64::NAN).is_err());
        assert!(decimal("x", f64::INFINITY).is_err());
    }

    #[test]
    fn default_live_sizing_is_valid() {
        let settings = risk_settings(&TradingSettings::default(), &LiveTradingSettings::default()).unwrap();
        let sizer = RiskBasedLot::new(settings).unwrap();
        // 1% of 10_000 over 50 points at 1.0 per point.
        assert_eq!(sizer.lot_size(Decimal::from(10_000)).unwrap(), Decimal::from(2));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["atlas-ma", "live", "--max-cycles", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Live { max_cycles: Some(3), data: None }));

        let cli = Cli::try_parse_from(["atlas-ma", "backtest", "--data", "bars.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::Backtest { data: Some(_), .. }));
    }
}
