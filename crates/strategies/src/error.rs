// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Strategy '{0}' has no implementation and cannot be selected")]
    NotAvailable(String),

    #[error("Failed to decode strategy params: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, Error>;
