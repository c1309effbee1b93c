//! Boolean window predicates over indicator series: monotonic runs and
//! sustained crossovers. Pure queries, no side effects.

use crate::domain::error::IntrasimError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::trade::TradeDirection;

/// Direction of a monotonic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
}

/// Whether every consecutive pair in the trailing `window` values ending at
/// `end_index` is strictly rising/falling. When `end_index < window` the
/// look-back is clamped to `end_index` so it never reaches before index 0.
pub fn values_monotonic(
    trend: Trend,
    window: usize,
    end_index: usize,
    series: &IndicatorSeries,
) -> Result<bool, IntrasimError> {
    if window == 0 {
        return Err(IntrasimError::InvalidConfiguration {
            reason: "monotonic window must be positive".into(),
        });
    }
    if end_index >= series.len() {
        return Err(IntrasimError::OutOfRange {
            index: end_index as isize,
            len: series.len(),
        });
    }

    let window = window.min(end_index);
    if window == 0 {
        // end_index == 0: no trailing pair to compare.
        return Ok(true);
    }

    for j in (end_index - window + 1)..end_index {
        let a = series.values[j];
        let b = series.values[j + 1];
        let holds = match trend {
            Trend::Rising => a < b,
            Trend::Falling => a > b,
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether the shorter-term series has stayed on the required side of the
/// longer-term one (`>=` for long confirmation, `<=` for short confirmation)
/// for every one of the `delay` most recent indices ending at `tick_index`.
pub fn sustained_crossover(
    direction: TradeDirection,
    delay: usize,
    tick_index: usize,
    shorter: &IndicatorSeries,
    longer: &IndicatorSeries,
) -> Result<bool, IntrasimError> {
    if delay == 0 {
        return Err(IntrasimError::InvalidConfiguration {
            reason: "crossover delay must be positive".into(),
        });
    }
    let len = shorter.len().min(longer.len());
    if tick_index >= len {
        return Err(IntrasimError::OutOfRange {
            index: tick_index as isize,
            len,
        });
    }
    if tick_index + 1 < delay {
        // The look-back would reach a negative index; refuse rather than wrap.
        return Err(IntrasimError::OutOfRange {
            index: tick_index as isize - delay as isize + 1,
            len,
        });
    }

    for ticks_ago in 0..delay {
        let index = tick_index - ticks_ago;
        let short_value = shorter.at(index)?;
        let long_value = longer.at(index)?;
        let holds = match direction {
            TradeDirection::Long => short_value >= long_value,
            TradeDirection::Short => short_value <= long_value,
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}
