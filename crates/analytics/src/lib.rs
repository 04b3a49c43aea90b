// In crates/analytics/src/lib.rs

pub mod engine;
pub mod types;

pub use engine::{calculate_metrics, equity_curve, AnalyticsEngine};
pub use types::{EquityPoint, PerformanceReport};
