//! Run orchestration: one strategy, one ledger, one pass over the series.

use super::error::IntrasimError;
use super::ledger::Ledger;
use super::strategy::Strategy;
use super::tick::TickSeries;
use super::trade::{TradeRecord, TradeSignal};
use crate::ports::render_port::RenderPort;

/// Everything a renderer needs after a completed run: the trade log, the
/// signal timeline, and a snapshot of the finalized ledger.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub strategy_name: String,
    pub trade_log: Vec<TradeRecord>,
    pub signals: Vec<TradeSignal>,
    pub ledger: Ledger,
}

/// Execute one full simulation: `pre_run` → strategy replay → `post_run`.
///
/// The run is atomic from the renderer's perspective; results are handed
/// over only after completion. An error from the strategy aborts the run
/// with the ledger in its last consistent state.
pub fn run_simulation(
    series: &TickSeries,
    ledger: &mut Ledger,
    strategy: &mut dyn Strategy,
    renderer: &mut dyn RenderPort,
) -> Result<SimulationResult, IntrasimError> {
    if series.is_empty() {
        return Err(IntrasimError::EmptySeries);
    }

    ledger.pre_run();
    let output = strategy.run(series, ledger, renderer)?;
    ledger.post_run(series)?;

    Ok(SimulationResult {
        strategy_name: strategy.name().to_string(),
        trade_log: output.trade_log,
        signals: output.signals,
        ledger: ledger.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::strategy::StrategyKind;
    use crate::domain::tick::Tick;
    use crate::ports::render_port::NullRenderer;

    fn series_at_prices(closes: &[f64]) -> TickSeries {
        let ticks = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Tick {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap()
                    + chrono::Duration::minutes(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
                age_days: 0,
            })
            .collect();
        TickSeries::from_ticks(ticks)
    }

    #[test]
    fn empty_series_rejected() {
        let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
        let mut strategy = StrategyKind::SimpleMomentum.build_default().unwrap();
        let mut renderer = NullRenderer;

        let err = run_simulation(
            &TickSeries::new(),
            &mut ledger,
            strategy.as_mut(),
            &mut renderer,
        )
        .unwrap_err();
        assert!(matches!(err, IntrasimError::EmptySeries));
    }

    #[test]
    fn run_finalizes_ledger() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
        let series = series_at_prices(&closes);
        let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
        let mut strategy = StrategyKind::SimpleMomentum.build_default().unwrap();
        let mut renderer = NullRenderer;

        let result =
            run_simulation(&series, &mut ledger, strategy.as_mut(), &mut renderer).unwrap();

        assert_eq!(result.strategy_name, "Simple Momentum (15, 5)");
        assert_eq!(result.ledger.position, 0);
        let expected_pl =
            result.ledger.cash - result.ledger.cash_initial + result.ledger.position_value;
        assert!((result.ledger.realized_pl - expected_pl).abs() < 1e-9);
    }

    #[test]
    fn rerun_is_independent_of_prior_run() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let series = series_at_prices(&closes);
        let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
        let mut renderer = NullRenderer;

        let mut first_strategy = StrategyKind::DelayedSmaCrossover.build_default().unwrap();
        let first =
            run_simulation(&series, &mut ledger, first_strategy.as_mut(), &mut renderer).unwrap();

        let mut second_strategy = StrategyKind::DelayedSmaCrossover.build_default().unwrap();
        let second =
            run_simulation(&series, &mut ledger, second_strategy.as_mut(), &mut renderer).unwrap();

        assert_eq!(first.trade_log, second.trade_log);
        assert_eq!(first.signals, second.signals);
        assert_eq!(first.ledger, second.ledger);
    }
}
