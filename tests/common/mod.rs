#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;

use intrasim::domain::error::IntrasimError;
pub use intrasim::domain::tick::{Tick, TickSeries};
use intrasim::ports::feed_port::FeedPort;

/// A tick series from a list of closes, one minute apart from the open,
/// with open/high/low pinned to the close.
pub fn series_at_prices(closes: &[f64]) -> TickSeries {
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

/// Closes that rise for `up` ticks then fall for `down` ticks.
pub fn rise_then_fall(up: usize, down: usize, start: f64, step: f64) -> Vec<f64> {
    let mut closes: Vec<f64> = (0..up).map(|i| start + step * i as f64).collect();
    let peak = start + step * (up.saturating_sub(1)) as f64;
    closes.extend((1..=down).map(|i| peak - step * i as f64));
    closes
}

/// Raw feed CSV content for a series, in the provider's field order:
/// timestamp, close, volume, age, open, high, low.
pub fn feed_csv(series: &TickSeries) -> String {
    let mut out = String::new();
    for tick in series.iter() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            tick.timestamp.and_utc().timestamp(),
            tick.close,
            tick.volume,
            tick.age_days,
            tick.open,
            tick.high,
            tick.low
        ));
    }
    out
}

pub struct MockFeedPort {
    pub series: HashMap<String, TickSeries>,
    pub errors: HashMap<String, String>,
}

impl MockFeedPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, ticker: &str, series: TickSeries) -> Self {
        self.series.insert(ticker.to_string(), series);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl FeedPort for MockFeedPort {
    fn fetch_ticks(
        &self,
        ticker: &str,
        exchange: &str,
        _day_offset: u32,
    ) -> Result<TickSeries, IntrasimError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(IntrasimError::Feed {
                ticker: ticker.to_string(),
                exchange: exchange.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.series.get(ticker).cloned().unwrap_or_default())
    }
}
