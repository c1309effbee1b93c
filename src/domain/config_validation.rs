//! Configuration validation.
//!
//! Validates all config fields before a simulation run.

use crate::domain::error::IntrasimError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    validate_initial_cash(config)?;
    validate_commission(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    let kind = validate_kind(config)?;
    match kind {
        StrategyKind::DelayedSmaCrossover | StrategyKind::SmaCrossover => {
            validate_crossover_windows(config)?
        }
        StrategyKind::SimpleMomentum => validate_momentum_windows(config)?,
    }
    validate_sizing(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    for key in ["path", "ticker", "exchange"] {
        match config.get_string("data", key) {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(IntrasimError::ConfigMissing {
                    section: "data".to_string(),
                    key: key.to_string(),
                });
            }
        }
    }
    let day_offset = config.get_int("data", "day_offset", 0);
    if day_offset < 0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "data".to_string(),
            key: "day_offset".to_string(),
            reason: "day_offset must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    let value = config.get_double("simulation", "initial_cash", 0.0);
    if value <= 0.0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_commission(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    let value = config.get_double("simulation", "commission_per_trade", 0.0);
    if value < 0.0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "commission_per_trade".to_string(),
            reason: "commission_per_trade must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_kind(config: &dyn ConfigPort) -> Result<StrategyKind, IntrasimError> {
    match config.get_string("strategy", "kind") {
        None => Err(IntrasimError::ConfigMissing {
            section: "strategy".to_string(),
            key: "kind".to_string(),
        }),
        Some(name) => {
            StrategyKind::from_name(&name).map_err(|_| IntrasimError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "kind".to_string(),
                reason: format!("unknown strategy '{name}'"),
            })
        }
    }
}

fn validate_crossover_windows(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    let shorter = config.get_int("strategy", "shorter_window", 15);
    let longer = config.get_int("strategy", "longer_window", 50);
    if shorter <= 0 || longer <= 0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "shorter_window".to_string(),
            reason: "SMA windows must be positive".to_string(),
        });
    }
    if shorter >= longer {
        return Err(IntrasimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "longer_window".to_string(),
            reason: "shorter_window must be less than longer_window".to_string(),
        });
    }
    let long_delay = config.get_int("strategy", "long_delay", 3);
    let short_delay = config.get_int("strategy", "short_delay", 3);
    if long_delay <= 0 || short_delay <= 0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long_delay".to_string(),
            reason: "confirmation delays must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_momentum_windows(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    let buy = config.get_int("strategy", "buy_window", 15);
    let sell = config.get_int("strategy", "sell_window", 5);
    if buy <= 0 || sell <= 0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "buy_window".to_string(),
            reason: "momentum windows must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_sizing(config: &dyn ConfigPort) -> Result<(), IntrasimError> {
    let base_long = config.get_int("strategy", "base_long_shares", 600);
    let base_short = config.get_int("strategy", "base_short_shares", 600);
    if base_long <= 0 || base_short <= 0 {
        return Err(IntrasimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "base_long_shares".to_string(),
            reason: "base trade sizes must be positive".to_string(),
        });
    }
    for key in ["long_fraction", "short_fraction"] {
        let value = config.get_double("strategy", key, 0.8);
        if value <= 0.0 || value > 1.0 {
            return Err(IntrasimError::ConfigInvalid {
                section: "strategy".to_string(),
                key: key.to_string(),
                reason: "sizing fractions must be in (0, 1]".to_string(),
            });
        }
    }
    Ok(())
}
