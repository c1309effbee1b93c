//! OHLCV tick storage for one instrument over one trading session.

use chrono::NaiveDateTime;

use super::error::IntrasimError;

/// Number of one-minute ticks in a full trading session. Data sources may
/// deliver fewer (mid-session or partial days); the engine tolerates that.
pub const FULL_SESSION_TICKS: usize = 390;

/// One OHLCV sample for a one-minute interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub age_days: u32,
}

/// Ordered tick sequence for one instrument/day.
///
/// All access is bounds-checked through [`TickSeries::at`]; there is no
/// index wraparound of any kind.
#[derive(Debug, Clone, Default)]
pub struct TickSeries {
    ticks: Vec<Tick>,
}

impl TickSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ticks(ticks: Vec<Tick>) -> Self {
        Self { ticks }
    }

    pub fn append(&mut self, tick: Tick) {
        self.ticks.push(tick);
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Tick, IntrasimError> {
        self.ticks.get(index).ok_or(IntrasimError::OutOfRange {
            index: index as isize,
            len: self.ticks.len(),
        })
    }

    /// Closing price at `index`.
    pub fn close(&self, index: usize) -> Result<f64, IntrasimError> {
        Ok(self.at(index)?.close)
    }

    pub fn last_index(&self) -> Result<usize, IntrasimError> {
        self.ticks
            .len()
            .checked_sub(1)
            .ok_or(IntrasimError::EmptySeries)
    }

    /// Minimum candlestick low across the session (chart scaling).
    pub fn min_low(&self) -> Result<f64, IntrasimError> {
        if self.ticks.is_empty() {
            return Err(IntrasimError::EmptySeries);
        }
        Ok(self.ticks.iter().map(|t| t.low).fold(f64::INFINITY, f64::min))
    }

    /// Maximum candlestick high across the session (chart scaling).
    pub fn max_high(&self) -> Result<f64, IntrasimError> {
        if self.ticks.is_empty() {
            return Err(IntrasimError::EmptySeries);
        }
        Ok(self
            .ticks
            .iter()
            .map(|t| t.high)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }
}
