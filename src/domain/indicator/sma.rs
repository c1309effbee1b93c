//! Simple Moving Average over closing prices.
//!
//! O(n) sliding window: add the close entering the window, subtract the one
//! leaving it. The first `duration - 1` values are warm-up partial means over
//! however many closes exist so far, not true `duration`-wide averages.

use crate::domain::error::IntrasimError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::tick::TickSeries;

pub fn simple_moving_average(
    series: &TickSeries,
    duration: usize,
) -> Result<IndicatorSeries, IntrasimError> {
    if duration == 0 {
        return Err(IntrasimError::InvalidConfiguration {
            reason: "SMA duration must be positive".into(),
        });
    }

    let mut values = Vec::with_capacity(series.len());
    let mut sum = 0.0;

    for i in 0..series.len() {
        sum += series.close(i)?;

        if i >= duration {
            // A sample leaves the window only from i == duration onward; at
            // i == duration - 1 the first full window is still being
            // established and nothing has dropped out yet. The tail index is
            // non-negative here by construction.
            sum -= series.close(i - duration)?;
            values.push(sum / duration as f64);
        } else if i + 1 >= duration {
            values.push(sum / duration as f64);
        } else {
            values.push(sum / (i + 1) as f64);
        }
    }

    Ok(IndicatorSeries { duration, values })
}
