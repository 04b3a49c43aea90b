// In crates/engine/src/lib.rs

pub mod bot;
pub mod data;
pub mod error;

pub use bot::{CycleOutcome, LiveBot, LiveSettings};
pub use data::{load_bars, CsvDataSource, MarketDataSource};
pub use error::{Error, Result};
