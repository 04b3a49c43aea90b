// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, BacktestSettings, LiveTradingSettings, Settings, TradingSettings};

/// Loads the application settings from the `config/` directory of the working directory.
///
/// Layers, later ones winning:
/// 1. `config/base.toml`.
/// 2. `config/{APP_ENVIRONMENT}.toml` if present (default `development`).
/// 3. Environment variables such as `APP_TRADING__SYMBOL=GBPUSD`.
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Same as [`load_settings`] with an explicit config directory and environment name.
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    build(dir, environment, app_environment())
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build(dir: &Path, environment: &str, env_source: Environment) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name(&dir.join("base").to_string_lossy()))
        .add_source(File::with_name(&dir.join(environment).to_string_lossy()).required(false))
        .add_source(env_source)
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    let t = &settings.trading;
    let positive = [
        ("trading.lot_size", t.lot_size),
        ("trading.stop_loss_pips", t.stop_loss_pips),
        ("trading.take_profit_pips", t.take_profit_pips),
        ("trading.point_size", t.point_size),
    ];
    if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
        return Err(Error::Invalid(format!("{} must be positive, got {}", name, value)));
    }
    if settings.live.poll_interval_secs == 0 {
        return Err(Error::Invalid("live.poll_interval_secs must be at least 1".to_string()));
    }
    Ok(())
}
