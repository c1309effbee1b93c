//! Market-data feed port trait.
//!
//! The provider is keyed by `(ticker, exchange, day_offset)` where
//! `day_offset` counts trading days back from today. Transport, parsing of
//! raw text, and retry policy all live behind this trait; the engine only
//! ever sees an ordered, already-parsed tick sequence.

use crate::domain::error::IntrasimError;
use crate::domain::tick::TickSeries;

pub trait FeedPort {
    fn fetch_ticks(
        &self,
        ticker: &str,
        exchange: &str,
        day_offset: u32,
    ) -> Result<TickSeries, IntrasimError>;
}
