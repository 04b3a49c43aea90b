// In crates/backtester/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid simulation settings: {0}")]
    Simulation(#[from] execution::Error),

    #[error("Invalid strategy settings: {0}")]
    Strategy(#[from] strategies::Error),

    #[error("Invalid bar series: {0}")]
    Series(#[from] core_types::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
