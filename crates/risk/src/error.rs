// In crates/risk/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid risk parameters: {0}")]
    InvalidParameters(String),

    #[error("Account equity must be positive, got {0}")]
    NonPositiveEquity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
