// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Bar timestamps must be strictly increasing (violated at index {index})")]
    NonIncreasingTimestamp { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
