//! CSV tick-feed adapter.
//!
//! Reads files named `{TICKER}_{EXCHANGE}_{day_offset}.csv` holding raw
//! per-minute records of 7 comma-separated numeric fields in the provider's
//! declared order: timestamp, close, volume, age-in-days, open, high, low.

use chrono::DateTime;
use std::path::PathBuf;

use crate::domain::error::IntrasimError;
use crate::domain::tick::{Tick, TickSeries};
use crate::ports::feed_port::FeedPort;

pub struct CsvFeedAdapter {
    base_path: PathBuf,
}

impl CsvFeedAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn feed_path(&self, ticker: &str, exchange: &str, day_offset: u32) -> PathBuf {
        self.base_path
            .join(format!("{}_{}_{}.csv", ticker, exchange, day_offset))
    }
}

fn feed_error(ticker: &str, exchange: &str, reason: String) -> IntrasimError {
    IntrasimError::Feed {
        ticker: ticker.to_string(),
        exchange: exchange.to_string(),
        reason,
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    ticker: &str,
    exchange: &str,
) -> Result<T, IntrasimError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| feed_error(ticker, exchange, format!("missing {name} field")))?
        .trim()
        .parse()
        .map_err(|e| feed_error(ticker, exchange, format!("invalid {name} value: {e}")))
}

impl FeedPort for CsvFeedAdapter {
    fn fetch_ticks(
        &self,
        ticker: &str,
        exchange: &str,
        day_offset: u32,
    ) -> Result<TickSeries, IntrasimError> {
        let path = self.feed_path(ticker, exchange, day_offset);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            feed_error(
                ticker,
                exchange,
                format!("failed to read {}: {}", path.display(), e),
            )
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.as_bytes());
        let mut series = TickSeries::new();

        for result in rdr.records() {
            let record =
                result.map_err(|e| feed_error(ticker, exchange, format!("CSV parse error: {e}")))?;

            let epoch: i64 = parse_field(&record, 0, "timestamp", ticker, exchange)?;
            let timestamp = DateTime::from_timestamp(epoch, 0)
                .ok_or_else(|| {
                    feed_error(ticker, exchange, format!("timestamp {epoch} out of range"))
                })?
                .naive_utc();

            let close: f64 = parse_field(&record, 1, "close", ticker, exchange)?;
            let volume: i64 = parse_field(&record, 2, "volume", ticker, exchange)?;
            let age_days: u32 = parse_field(&record, 3, "age", ticker, exchange)?;
            let open: f64 = parse_field(&record, 4, "open", ticker, exchange)?;
            let high: f64 = parse_field(&record, 5, "high", ticker, exchange)?;
            let low: f64 = parse_field(&record, 6, "low", ticker, exchange)?;

            series.append(Tick {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
                age_days,
            });
        }

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_feed_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        // timestamp, close, volume, age, open, high, low
        let raw = "1705312200,105.5,50000,0,100.0,110.0,95.0\n\
                   1705312260,106.0,60000,0,105.5,112.0,101.0\n\
                   1705312320,104.0,55000,0,106.0,108.0,99.5\n";
        fs::write(path.join("AAPL_NASD_0.csv"), raw).unwrap();
        fs::write(path.join("AAPL_NASD_1.csv"), "not,a,number\n").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_parses_declared_field_order() {
        let (_dir, path) = setup_feed_dir();
        let adapter = CsvFeedAdapter::new(path);

        let series = adapter.fetch_ticks("AAPL", "NASD", 0).unwrap();
        assert_eq!(series.len(), 3);

        let first = series.at(0).unwrap();
        assert_eq!(first.close, 105.5);
        assert_eq!(first.volume, 50000);
        assert_eq!(first.age_days, 0);
        assert_eq!(first.open, 100.0);
        assert_eq!(first.high, 110.0);
        assert_eq!(first.low, 95.0);

        assert_eq!(series.min_low().unwrap(), 95.0);
        assert_eq!(series.max_high().unwrap(), 112.0);
    }

    #[test]
    fn fetch_missing_file_is_feed_error() {
        let (_dir, path) = setup_feed_dir();
        let adapter = CsvFeedAdapter::new(path);

        let err = adapter.fetch_ticks("MSFT", "NASD", 0).unwrap_err();
        assert!(matches!(err, IntrasimError::Feed { .. }));
    }

    #[test]
    fn fetch_malformed_row_is_feed_error() {
        let (_dir, path) = setup_feed_dir();
        let adapter = CsvFeedAdapter::new(path);

        let err = adapter.fetch_ticks("AAPL", "NASD", 1).unwrap_err();
        match err {
            IntrasimError::Feed { reason, .. } => assert!(reason.contains("invalid")),
            other => panic!("expected feed error, got {other:?}"),
        }
    }
}
