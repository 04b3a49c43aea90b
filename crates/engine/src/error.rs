// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read bar data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid bar at row {row}: {reason}")]
    InvalidBar { row: usize, reason: String },

    #[error("Invalid bar series: {0}")]
    Series(#[from] core_types::Error),

    #[error("Order gateway error: {0}")]
    Execution(#[from] execution::Error),

    #[error("Lot sizing failed: {0}")]
    Risk(#[from] risk::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
