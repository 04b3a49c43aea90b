// In crates/engine/src/data.rs

use std::path::Path;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use core_types::{validate_series, Bar, Symbol};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{Error, Result};

/// A source of recent bars for the live loop.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Up to `count` of the most recent bars, oldest first.
    ///
    /// `Ok(None)` means no data is available this cycle. It is not an error.
    async fn latest_bars(
        &mut self,
        symbol: &Symbol,
        timeframe: &str,
        count: usize,
    ) -> Result<Option<Vec<Bar>>>;
}

/// A row of a `time,open,high,low,close` file, `time` in unix seconds.
#[derive(Debug, Deserialize)]
struct BarRecord {
    time: i64,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
}

/// Loads and validates a bar series from a CSV file.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut bars = Vec::new();

    for (row, record) in reader.deserialize::<BarRecord>().enumerate() {
        let record = record?;
        let timestamp = Utc
            .timestamp_opt(record.time, 0)
            .single()
            .ok_or_else(|| Error::InvalidBar {
                row,
                reason: format!("timestamp {} is out of range", record.time),
            })?;
        bars.push(Bar {
            timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        });
    }

    validate_series(&bars)?;
    tracing::info!(path = %path.as_ref().display(), bars = bars.len(), "Loaded bar history.");
    Ok(bars)
}

/// Serves bars from an in-memory series loaded from CSV.
///
/// By default every call sees the whole series. In replay mode the series is
/// revealed one bar per call, which simulates a live feed for paper runs.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    bars: Vec<Bar>,
    // Number of bars currently visible, replay mode only.
    cursor: Option<usize>,
}

impl CsvDataSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            bars: load_bars(path)?,
            cursor: None,
        })
    }

    pub fn from_bars(bars: Vec<Bar>) -> Result<Self> {
        validate_series(&bars)?;
        Ok(Self { bars, cursor: None })
    }

    /// Switches to replay mode, starting from an empty view.
    pub fn replay(mut self) -> Self {
        self.cursor = Some(0);
        self
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

#[async_trait]
impl MarketDataSource for CsvDataSource {
    async fn latest_bars(
        &mut self,
        symbol: &Symbol,
        timeframe: &str,
        count: usize,
    ) -> Result<Option<Vec<Bar>>> {
        let visible = match self.cursor {
            None => self.bars.len(),
            Some(cursor) => {
                // The first call fills a whole window, later calls add one bar each.
                let next = (cursor + 1).max(count);
                if cursor >= self.bars.len() {
                    tracing::debug!(%symbol, timeframe, "Replay exhausted.");
                    return Ok(None);
                }
                self.cursor = Some(next);
                next.min(self.bars.len())
            }
        };

        if visible == 0 {
            return Ok(None);
        }
        let start = visible.saturating_sub(count);
        Ok(Some(self.bars[start..visible].to_vec()))
    }
}
