//! Simple momentum strategy.
//!
//! Buys when the buy-window SMA has been strictly rising for its full window
//! of ticks, sells short when the sell-window SMA has been strictly falling
//! for its full window.

use crate::domain::error::IntrasimError;
use crate::domain::indicator::sma::simple_moving_average;
use crate::domain::indicator::trend::{values_monotonic, Trend};
use crate::domain::indicator::IndicatorSeries;
use crate::domain::ledger::Ledger;
use crate::domain::tick::TickSeries;
use crate::domain::trade::TradeDirection;
use crate::ports::render_port::RenderPort;

use super::{
    enter_position, liquidate_position, IndicatorOverlay, RunOutput, Strategy, TradeSizing,
};

#[derive(Debug, Clone)]
pub struct SimpleMomentum {
    pub buy_window: usize,
    pub sell_window: usize,
    pub sizing: TradeSizing,
    name: String,
    sma_buy: Option<IndicatorSeries>,
    sma_sell: Option<IndicatorSeries>,
}

impl SimpleMomentum {
    pub fn new(
        buy_window: usize,
        sell_window: usize,
        sizing: TradeSizing,
    ) -> Result<Self, IntrasimError> {
        if buy_window == 0 || sell_window == 0 {
            return Err(IntrasimError::InvalidConfiguration {
                reason: "momentum windows must be positive".into(),
            });
        }
        let name = format!("Simple Momentum ({buy_window}, {sell_window})");
        Ok(SimpleMomentum {
            buy_window,
            sell_window,
            sizing,
            name,
            sma_buy: None,
            sma_sell: None,
        })
    }
}

impl Strategy for SimpleMomentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn indicator_overlay(&self) -> IndicatorOverlay {
        IndicatorOverlay::DoubleSma {
            shorter: self.sell_window.min(self.buy_window),
            longer: self.sell_window.max(self.buy_window),
        }
    }

    fn run(
        &mut self,
        series: &TickSeries,
        ledger: &mut Ledger,
        renderer: &mut dyn RenderPort,
    ) -> Result<RunOutput, IntrasimError> {
        let sma_buy = simple_moving_average(series, self.buy_window)?;
        let sma_sell = simple_moving_average(series, self.sell_window)?;
        self.sma_buy = Some(sma_buy.clone());
        self.sma_sell = Some(sma_sell.clone());

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
            } else if i > self.buy_window && long_within_limits {
                if values_monotonic(Trend::Rising, self.buy_window, i, &sma_buy)? {
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
            } else if i > self.sell_window && short_within_limits {
                if values_monotonic(Trend::Falling, self.sell_window, i, &sma_sell)? {
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
        match (&self.sma_buy, &self.sma_sell) {
            (Some(buy), Some(sell)) => {
                match (buy.values.get(tick_index), sell.values.get(tick_index)) {
                    (Some(buy_value), Some(sell_value)) => format!(
                        "Long(Buy) SMA={buy_value}, Short(Sell) SMA={sell_value}"
                    ),
                    _ => String::new(),
                }
            }
            _ => String::new(),
        }
    }
}
