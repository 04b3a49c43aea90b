// In crates/app-config/src/types.rs

use serde::Deserialize;

use core_types::StrategyConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Instrument, order and cost parameters shared by backtests and live runs.
    #[serde(default)]
    pub trading: TradingSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub live: LiveTradingSettings,
    /// The `[strategy]` block: a name plus its `params` table.
    #[serde(default = "default_strategy")]
    pub strategy: StrategyConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The log level for the application.
    pub log_level: String,
    /// Directory of the `trading.log` file.
    pub log_dir: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TradingSettings {
    pub symbol: String,
    pub timeframe: String,
    pub lot_size: f64,
    /// Tag attributing broker orders to this bot.
    pub magic_number: u64,
    pub stop_loss_pips: f64,
    pub take_profit_pips: f64,
    /// Minimum price increment of the symbol.
    pub point_size: f64,
    pub spread_points: f64,
    /// Flat commission per closed trade, in account currency.
    pub commission: f64,
}

impl Default for TradingSettings {
    fn default() -> Self {
        Self {
            symbol: "EURUSD".to_string(),
            timeframe: "M15".to_string(),
            lot_size: 0.01,
            magic_number: 123456,
            stop_loss_pips: 50.0,
            take_profit_pips: 100.0,
            point_size: 0.00001,
            spread_points: 2.0,
            commission: 2.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BacktestSettings {
    pub initial_balance: f64,
    /// CSV file of `time,open,high,low,close` rows.
    pub data_path: String,
    pub trades_out: Option<String>,
    pub equity_out: Option<String>,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_balance: 10_000.0,
            data_path: "data/EURUSD_M15.csv".to_string(),
            trades_out: None,
            equity_out: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LiveTradingSettings {
    pub poll_interval_secs: u64,
    /// Bars fetched per cycle on top of the strategy's long period.
    pub history_padding: usize,
    pub risk_per_trade_percent: f64,
    /// Account-currency value of one point for one lot.
    pub point_value_per_lot: f64,
    pub min_lot: f64,
    pub max_lot: f64,
    pub lot_step: f64,
    /// Starting equity of the paper gateway.
    pub paper_equity: f64,
}

impl Default for LiveTradingSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            history_padding: 5,
            risk_per_trade_percent: 1.0,
            point_value_per_lot: 1.0,
            min_lot: 0.01,
            max_lot: 10.0,
            lot_step: 0.01,
            paper_equity: 10_000.0,
        }
    }
}

fn default_strategy() -> StrategyConfig {
    StrategyConfig {
        name: "ma_crossover".to_string(),
        params: toml::Value::Table(Default::default()),
    }
}
