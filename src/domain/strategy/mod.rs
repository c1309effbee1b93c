//! Strategy contract, shared trade mechanics, and the strategy catalog.

pub mod delayed_crossover;
pub mod momentum;

use std::fmt;

use super::error::IntrasimError;
use super::ledger::Ledger;
use super::tick::TickSeries;
use super::trade::{TradeDirection, TradeRecord, TradeSignal};
use crate::ports::render_port::RenderPort;

pub use delayed_crossover::DelayedSmaCrossover;
pub use momentum::SimpleMomentum;

/// Indicator overlay the renderer should draw for a strategy. Pure data,
/// no drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorOverlay {
    DoubleSma { shorter: usize, longer: usize },
}

/// Trade log and signal timeline produced by one run.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub trade_log: Vec<TradeRecord>,
    pub signals: Vec<TradeSignal>,
}

/// Contract every strategy variant implements. One run iterates tick indices
/// in order, consulting indicator values and ledger limit checks; the first
/// error aborts the run (a skipped tick would desynchronize the ledger).
pub trait Strategy {
    fn name(&self) -> &str;

    /// Which indicator(s) the renderer should overlay.
    fn indicator_overlay(&self) -> IndicatorOverlay;

    /// Replay the full series once, mutating the ledger and producing the
    /// trade log and signal list.
    fn run(
        &mut self,
        series: &TickSeries,
        ledger: &mut Ledger,
        renderer: &mut dyn RenderPort,
    ) -> Result<RunOutput, IntrasimError>;

    /// Human-readable indicator snapshot for the trade log at `tick_index`.
    fn annotate_trade(&self, tick_index: usize) -> String;
}

/// Base trade sizes and the equity fractions used by [`TradeSizing::resize`].
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSizing {
    pub base_long_shares: i64,
    pub base_short_shares: i64,
    pub long_fraction: f64,
    pub short_fraction: f64,
}

impl Default for TradeSizing {
    fn default() -> Self {
        TradeSizing {
            base_long_shares: 600,
            base_short_shares: 600,
            long_fraction: 0.8,
            short_fraction: 0.8,
        }
    }
}

impl TradeSizing {
    pub fn new(
        base_long_shares: i64,
        base_short_shares: i64,
        long_fraction: f64,
        short_fraction: f64,
    ) -> Result<Self, IntrasimError> {
        if base_long_shares <= 0 || base_short_shares <= 0 {
            return Err(IntrasimError::InvalidConfiguration {
                reason: "base trade sizes must be positive".into(),
            });
        }
        if !(0.0..=1.0).contains(&long_fraction)
            || !(0.0..=1.0).contains(&short_fraction)
            || long_fraction == 0.0
            || short_fraction == 0.0
        {
            return Err(IntrasimError::InvalidConfiguration {
                reason: "sizing fractions must be in (0, 1]".into(),
            });
        }
        Ok(TradeSizing {
            base_long_shares,
            base_short_shares,
            long_fraction,
            short_fraction,
        })
    }

    /// Recompute the base trade sizes from current account equity at the
    /// price of `tick_index`. Opt-in: neither built-in strategy calls this
    /// from its run loop.
    pub fn resize(
        &mut self,
        series: &TickSeries,
        ledger: &Ledger,
        tick_index: usize,
    ) -> Result<(), IntrasimError> {
        let price = series.close(tick_index)?;
        let equity = ledger.cash + ledger.position_value;
        self.base_long_shares = (self.long_fraction * equity / price).floor() as i64;
        self.base_short_shares = (self.short_fraction * equity / price).floor() as i64;
        Ok(())
    }
}

/// Execute one trade: apply the ledger deltas, append a record and signal,
/// and fire the renderer notification.
pub(crate) fn enter_position(
    direction: TradeDirection,
    series: &TickSeries,
    ledger: &mut Ledger,
    tick_index: usize,
    shares: i64,
    strategy_name: &str,
    annotation: String,
    output: &mut RunOutput,
    renderer: &mut dyn RenderPort,
) -> Result<(), IntrasimError> {
    let price = series.close(tick_index)?;
    let notional = shares as f64 * price;

    let cash_delta = match direction {
        TradeDirection::Long => {
            ledger.execute_long(series, tick_index, shares)?;
            -notional
        }
        TradeDirection::Short => {
            ledger.execute_short(series, tick_index, shares)?;
            notional
        }
    };

    output.trade_log.push(TradeRecord {
        tick_index,
        strategy_name: strategy_name.to_string(),
        direction,
        shares,
        price_per_share: price,
        cash_delta,
        position_value: ledger.position as f64 * price,
        annotation,
    });
    output.signals.push(TradeSignal {
        tick_index,
        direction,
    });
    renderer.chart_changed();
    Ok(())
}

/// Close any open position to flat, called at the terminal tick. Takes
/// precedence over entry decisions at that index.
pub(crate) fn liquidate_position(
    series: &TickSeries,
    ledger: &mut Ledger,
    tick_index: usize,
    strategy_name: &str,
    annotation: String,
    output: &mut RunOutput,
    renderer: &mut dyn RenderPort,
) -> Result<(), IntrasimError> {
    if ledger.position > 0 {
        let shares = ledger.position;
        enter_position(
            TradeDirection::Short,
            series,
            ledger,
            tick_index,
            shares,
            strategy_name,
            annotation,
            output,
            renderer,
        )
    } else if ledger.position < 0 {
        let shares = -ledger.position;
        enter_position(
            TradeDirection::Long,
            series,
            ledger,
            tick_index,
            shares,
            strategy_name,
            annotation,
            output,
            renderer,
        )
    } else {
        Ok(())
    }
}

/// Fixed catalog of strategy variants, selected by index or name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    DelayedSmaCrossover,
    SmaCrossover,
    SimpleMomentum,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::DelayedSmaCrossover,
        StrategyKind::SmaCrossover,
        StrategyKind::SimpleMomentum,
    ];

    pub fn from_index(index: usize) -> Result<Self, IntrasimError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| IntrasimError::InvalidConfiguration {
                reason: format!(
                    "strategy index {index} out of catalog (0..{})",
                    Self::ALL.len()
                ),
            })
    }

    pub fn from_name(name: &str) -> Result<Self, IntrasimError> {
        match name {
            "delayed-sma-crossover" => Ok(StrategyKind::DelayedSmaCrossover),
            "sma-crossover" => Ok(StrategyKind::SmaCrossover),
            "simple-momentum" => Ok(StrategyKind::SimpleMomentum),
            _ => Err(IntrasimError::InvalidConfiguration {
                reason: format!("unknown strategy '{name}'"),
            }),
        }
    }

    /// Build the variant with its catalog-default parameters. The plain
    /// crossover is the delayed variant with a one-tick confirmation.
    pub fn build_default(self) -> Result<Box<dyn Strategy>, IntrasimError> {
        let sizing = TradeSizing::default();
        Ok(match self {
            StrategyKind::DelayedSmaCrossover => {
                Box::new(DelayedSmaCrossover::new(15, 50, 3, 3, sizing)?)
            }
            StrategyKind::SmaCrossover => {
                Box::new(DelayedSmaCrossover::new(15, 50, 1, 1, sizing)?)
            }
            StrategyKind::SimpleMomentum => Box::new(SimpleMomentum::new(15, 5, sizing)?),
        })
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::DelayedSmaCrossover => write!(f, "delayed-sma-crossover"),
            StrategyKind::SmaCrossover => write!(f, "sma-crossover"),
            StrategyKind::SimpleMomentum => write!(f, "simple-momentum"),
        }
    }
}
