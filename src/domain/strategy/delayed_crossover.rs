//! Delayed SMA crossover strategy.
//!
//! Maintains a shorter- and a longer-window SMA. A long entry requires the
//! shorter SMA to have stayed at or above the longer one for a confirmation
//! delay; a short entry fires on the immediate cross down (previous tick
//! above, current tick at/below). The asymmetry is deliberate: longs wait
//! out noise, shorts react at once.

use crate::domain::error::IntrasimError;
use crate::domain::indicator::sma::simple_moving_average;
use crate::domain::indicator::trend::sustained_crossover;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::ledger::Ledger;
use crate::domain::tick::TickSeries;
use crate::domain::trade::TradeDirection;
use crate::ports::render_port::RenderPort;

use super::{
    enter_position, liquidate_position, IndicatorOverlay, RunOutput, Strategy, TradeSizing,
};

#[derive(Debug, Clone)]
pub struct DelayedSmaCrossover {
    pub shorter: usize,
    pub longer: usize,
    pub long_delay: usize,
    /// Confirmation delay for short entries. Present for symmetry with the
    /// long side but not consulted by the run loop: short entries use the
    /// immediate crossover check.
    pub short_delay: usize,
    pub sizing: TradeSizing,
    name: String,
    sma_shorter: Option<IndicatorSeries>,
    sma_longer: Option<IndicatorSeries>,
}

impl DelayedSmaCrossover {
    pub fn new(
        shorter: usize,
        longer: usize,
        long_delay: usize,
        short_delay: usize,
        sizing: TradeSizing,
    ) -> Result<Self, IntrasimError> {
        if shorter == 0 || longer == 0 {
            return Err(IntrasimError::InvalidConfiguration {
                reason: "SMA windows must be positive".into(),
            });
        }
        if shorter >= longer {
            return Err(IntrasimError::InvalidConfiguration {
                reason: format!(
                    "shorter window ({shorter}) must be less than longer window ({longer})"
                ),
            });
        }
        if long_delay == 0 || short_delay == 0 {
            return Err(IntrasimError::InvalidConfiguration {
                reason: "confirmation delays must be positive".into(),
            });
        }

        let name = if long_delay == 1 {
            format!("SMA Crossover({shorter},{longer})")
        } else {
            format!("SMA Crossover({shorter},{longer}) D={long_delay}")
        };

        Ok(DelayedSmaCrossover {
            shorter,
            longer,
            long_delay,
            short_delay,
            sizing,
            name,
            sma_shorter: None,
            sma_longer: None,
        })
    }
}

impl Strategy for DelayedSmaCrossover {
    fn name(&self) -> &str {
        &self.name
    }

    fn indicator_overlay(&self) -> IndicatorOverlay {
        IndicatorOverlay::DoubleSma {
            shorter: self.shorter,
            longer: self.longer,
        }
    }

    fn run(
        &mut self,
        series: &TickSeries,
        ledger: &mut Ledger,
        renderer: &mut dyn RenderPort,
    ) -> Result<RunOutput, IntrasimError> {
        let sma_shorter = simple_moving_average(series, self.shorter)?;
        let sma_longer = simple_moving_average(series, self.longer)?;
        self.sma_shorter = Some(sma_shorter.clone());
        self.sma_longer = Some(sma_longer.clone());

        let mut output = RunOutput::default();
        let len = series.len();

        for i in 0..len {
            let long_within_limits = ledger.check_long_within_limits(
                ledger.position_value,
                series,
                i,
                self.sizing.base_long_shares,
            )?;
            let short_within_limits = ledger.check_short_within_limits(
                ledger.position_value,
                series,
                i,
                self.sizing.base_short_shares,
            )?;

            if i + 1 == len {
                // End-of-session liquidation, ahead of any entry decision.
                let annotation = self.annotate_trade(i);
                liquidate_position(
                    series,
                    ledger,
                    i,
                    &self.name,
                    annotation,
                    &mut output,
                    renderer,
                )?;
            } else if i > self.longer && long_within_limits {
                if sustained_crossover(
                    TradeDirection::Long,
                    self.long_delay,
                    i,
                    &sma_shorter,
                    &sma_longer,
                )? {
                    let annotation = self.annotate_trade(i);
                    enter_position(
                        TradeDirection::Long,
                        series,
                        ledger,
                        i,
                        self.sizing.base_long_shares,
                        &self.name,
                        annotation,
                        &mut output,
                        renderer,
                    )?;
                }
            } else if i > self.longer && short_within_limits {
                let prev_short = sma_shorter.at(i - 1)?;
                let prev_long = sma_longer.at(i - 1)?;
                let curr_short = sma_shorter.at(i)?;
                let curr_long = sma_longer.at(i)?;

                if prev_short > prev_long && curr_short <= curr_long {
                    let annotation = self.annotate_trade(i);
                    enter_position(
                        TradeDirection::Short,
                        series,
                        ledger,
                        i,
                        self.sizing.base_short_shares,
                        &self.name,
                        annotation,
                        &mut output,
                        renderer,
                    )?;
                }
            }
        }

        Ok(output)
    }

    fn annotate_trade(&self, tick_index: usize) -> String {
        match (&self.sma_shorter, &self.sma_longer) {
            (Some(shorter), Some(longer)) => {
                match (
                    longer.values.get(tick_index),
                    shorter.values.get(tick_index),
                ) {
                    (Some(long_value), Some(short_value)) => format!(
                        "long-term SMA={long_value}, short-term SMA={short_value}"
                    ),
                    _ => String::new(),
                }
            }
            _ => String::new(),
        }
    }
}
