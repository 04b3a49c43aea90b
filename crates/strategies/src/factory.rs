use crate::ma_crossover::MACrossover;
use crate::types::MACrossoverSettings;
use crate::{Error, Result, SignalState, Strategy};
use core_types::{Bar, Signal, StrategyConfig};

/// The closed set of strategies a bot can be configured with.
#[derive(Debug, Clone)]
pub enum StrategyKind {
    MovingAverageCrossover(MACrossover),
}

impl StrategyKind {
    /// Builds a strategy from its `[strategy]` configuration block.
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        match config.name.as_str() {
            "ma_crossover" | "rule_based" => {
                let settings: MACrossoverSettings = config
                    .params
                    .clone()
                    .try_into()
                    .map_err(|e| Error::InvalidParams(e.to_string()))?;
                Ok(StrategyKind::MovingAverageCrossover(MACrossover::new(settings)?))
            }
            "ml_strategy" => Err(Error::NotAvailable(config.name.clone())),
            unknown => Err(Error::UnknownStrategy(unknown.to_string())),
        }
    }
}

impl Strategy for StrategyKind {
    fn name(&self) -> &'static str {
        match self {
            StrategyKind::MovingAverageCrossover(s) => s.name(),
        }
    }

    fn warmup_bars(&self) -> usize {
        match self {
            StrategyKind::MovingAverageCrossover(s) => s.warmup_bars(),
        }
    }

    fn assess(&self, klines: &[Bar], state: SignalState) -> (Signal, SignalState) {
        match self {
            StrategyKind::MovingAverageCrossover(s) => s.assess(klines, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, params: &str) -> StrategyConfig {
        StrategyConfig {
            name: name.to_string(),
            params: toml::from_str(params).unwrap(),
        }
    }

    #[test]
    fn builds_ma_crossover_from_params() {
        let kind = StrategyKind::from_config(&config(
            "ma_crossover",
            "short_period = 3\nlong_period = 5",
        ))
        .unwrap();
        assert_eq!(kind.warmup_bars(), 5);
        assert_eq!(kind.name(), "MovingAverageCrossover");
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let kind = StrategyKind::from_config(&config("rule_based", "")).unwrap();
        assert_eq!(kind.warmup_bars(), 21);
    }

    #[test]
    fn ml_strategy_is_not_selectable() {
        let err = StrategyKind::from_config(&config("ml_strategy", "")).unwrap_err();
        assert!(matches!(err, Error::NotAvailable(name) if name == "ml_strategy"));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let err = StrategyKind::from_config(&config("momentum", "")).unwrap_err();
        assert!(matches!(err, Error::UnknownStrategy(_)));
    }

    #[test]
    fn invalid_periods_are_rejected() {
        let err = StrategyKind::from_config(&config(
            "ma_crossover",
            "short_period = 21\nlong_period = 9",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }
}
