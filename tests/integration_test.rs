mod common;

use std::fs;
use tempfile::TempDir;

use common::{feed_csv, rise_then_fall, series_at_prices, MockFeedPort};
use intrasim::adapters::csv_feed_adapter::CsvFeedAdapter;
use intrasim::domain::error::IntrasimError;
use intrasim::domain::ledger::Ledger;
use intrasim::domain::simulation::run_simulation;
use intrasim::domain::strategy::{DelayedSmaCrossover, StrategyKind, TradeSizing};
use intrasim::domain::trade::TradeDirection;
use intrasim::ports::feed_port::FeedPort;
use intrasim::ports::render_port::{CountingRenderer, NullRenderer};

#[test]
fn full_pipeline_from_csv_feed() {
    let closes = rise_then_fall(30, 29, 100.0, 1.0);
    let series = series_at_prices(&closes);

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("AAPL_NASD_0.csv"), feed_csv(&series)).unwrap();

    let feed = CsvFeedAdapter::new(dir.path().to_path_buf());
    let loaded = feed.fetch_ticks("AAPL", "NASD", 0).unwrap();
    assert_eq!(loaded.len(), series.len());

    let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
    let mut strategy = DelayedSmaCrossover::new(3, 8, 2, 2, TradeSizing::default()).unwrap();
    let mut renderer = NullRenderer;

    let result = run_simulation(&loaded, &mut ledger, &mut strategy, &mut renderer).unwrap();
    assert!(!result.trade_log.is_empty());
    assert_eq!(result.ledger.position, 0);
    let expected_pl = result.ledger.cash - result.ledger.cash_initial + result.ledger.position_value;
    assert!((result.ledger.realized_pl - expected_pl).abs() < 1e-9);
}

#[test]
fn no_trade_breaches_exposure_limits() {
    // A small account: the limit check should refuse entries that would push
    // absolute exposure past the starting cash.
    let closes = rise_then_fall(40, 39, 100.0, 1.0);
    let series = series_at_prices(&closes);

    let mut ledger = Ledger::new(70_000.0, 10.0).unwrap();
    let mut strategy = DelayedSmaCrossover::new(3, 8, 2, 2, TradeSizing::default()).unwrap();
    let mut renderer = NullRenderer;

    let result = run_simulation(&series, &mut ledger, &mut strategy, &mut renderer).unwrap();

    let last = series.len() - 1;
    let mut position_value = 0.0;
    for record in &result.trade_log {
        let signed = match record.direction {
            TradeDirection::Long => record.shares as f64,
            TradeDirection::Short => -(record.shares as f64),
        };
        position_value += signed * record.price_per_share;
        if record.tick_index != last {
            assert!(
                position_value <= 70_000.0 + 1e-9 && position_value >= -70_000.0 - 1e-9,
                "exposure {position_value} breaches limits at tick {}",
                record.tick_index
            );
        }
    }
}

#[test]
fn every_strategy_ends_the_session_flat() {
    let closes = rise_then_fall(200, 189, 100.0, 0.5);
    let series = series_at_prices(&closes);

    for kind in StrategyKind::ALL {
        let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
        let mut strategy = kind.build_default().unwrap();
        let mut renderer = NullRenderer;

        let result =
            run_simulation(&series, &mut ledger, strategy.as_mut(), &mut renderer).unwrap();
        assert_eq!(result.ledger.position, 0, "{kind} left an open position");
    }
}

#[test]
fn renderer_notified_once_per_trade() {
    let closes = rise_then_fall(30, 29, 100.0, 1.0);
    let series = series_at_prices(&closes);

    let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
    let mut strategy = DelayedSmaCrossover::new(3, 8, 2, 2, TradeSizing::default()).unwrap();
    let mut renderer = CountingRenderer::default();

    let result = run_simulation(&series, &mut ledger, &mut strategy, &mut renderer).unwrap();
    assert_eq!(renderer.notifications, result.trade_log.len());
}

#[test]
fn commission_accrues_per_trade() {
    let closes = rise_then_fall(30, 29, 100.0, 1.0);
    let series = series_at_prices(&closes);

    let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
    let mut strategy = DelayedSmaCrossover::new(3, 8, 2, 2, TradeSizing::default()).unwrap();
    let mut renderer = NullRenderer;

    let result = run_simulation(&series, &mut ledger, &mut strategy, &mut renderer).unwrap();
    let expected = 10.0 * result.trade_log.len() as f64;
    assert!((result.ledger.commission_total - expected).abs() < 1e-9);
}

#[test]
fn feed_errors_surface_through_the_port() {
    let feed = MockFeedPort::new().with_error("AAPL", "connection refused");
    let err = feed.fetch_ticks("AAPL", "NASD", 0).unwrap_err();
    match err {
        IntrasimError::Feed {
            ticker, reason, ..
        } => {
            assert_eq!(ticker, "AAPL");
            assert!(reason.contains("connection refused"));
        }
        other => panic!("expected feed error, got {other:?}"),
    }
}

#[test]
fn empty_feed_gives_empty_series_error() {
    let feed = MockFeedPort::new();
    let series = feed.fetch_ticks("AAPL", "NASD", 0).unwrap();

    let mut ledger = Ledger::new(100_000.0, 10.0).unwrap();
    let mut strategy = StrategyKind::SimpleMomentum.build_default().unwrap();
    let mut renderer = NullRenderer;

    let err =
        run_simulation(&series, &mut ledger, strategy.as_mut(), &mut renderer).unwrap_err();
    assert!(matches!(err, IntrasimError::EmptySeries));
}
