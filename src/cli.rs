//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_feed_adapter::CsvFeedAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    validate_data_config, validate_simulation_config, validate_strategy_config,
};
use crate::domain::error::IntrasimError;
use crate::domain::ledger::Ledger;
use crate::domain::simulation::{run_simulation, SimulationResult};
use crate::domain::strategy::{
    DelayedSmaCrossover, SimpleMomentum, Strategy, StrategyKind, TradeSizing,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::feed_port::FeedPort;
use crate::ports::render_port::NullRenderer;

#[derive(Parser, Debug)]
#[command(name = "intrasim", about = "Intraday trading-strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay one trading day through a strategy
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Catalog index overriding the configured strategy kind
        #[arg(short, long)]
        strategy: Option<usize>,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
        #[arg(long)]
        day_offset: Option<u32>,
    },
    /// List the strategy catalog
    ListStrategies,
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            strategy,
            ticker,
            exchange,
            day_offset,
        } => run_simulate(
            &config,
            strategy,
            ticker.as_deref(),
            exchange.as_deref(),
            day_offset,
        ),
        Command::ListStrategies => run_list_strategies(),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = IntrasimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Ledger from the `[simulation]` section.
pub fn build_ledger(config: &dyn ConfigPort) -> Result<Ledger, IntrasimError> {
    let initial_cash = config.get_double("simulation", "initial_cash", 100_000.0);
    let commission = config.get_double("simulation", "commission_per_trade", 10.0);
    Ledger::new(initial_cash, commission)
}

fn build_sizing(config: &dyn ConfigPort) -> Result<TradeSizing, IntrasimError> {
    TradeSizing::new(
        config.get_int("strategy", "base_long_shares", 600),
        config.get_int("strategy", "base_short_shares", 600),
        config.get_double("strategy", "long_fraction", 0.8),
        config.get_double("strategy", "short_fraction", 0.8),
    )
}

/// Strategy from the `[strategy]` section, with an optional catalog-index
/// override from the command line.
pub fn build_strategy(
    config: &dyn ConfigPort,
    index_override: Option<usize>,
) -> Result<Box<dyn Strategy>, IntrasimError> {
    let kind = match index_override {
        Some(index) => StrategyKind::from_index(index)?,
        None => match config.get_string("strategy", "kind") {
            Some(name) => StrategyKind::from_name(&name)?,
            None => {
                return Err(IntrasimError::ConfigMissing {
                    section: "strategy".to_string(),
                    key: "kind".to_string(),
                });
            }
        },
    };

    let sizing = build_sizing(config)?;

    let shorter = config.get_int("strategy", "shorter_window", 15) as usize;
    let longer = config.get_int("strategy", "longer_window", 50) as usize;

    Ok(match kind {
        StrategyKind::DelayedSmaCrossover => {
            let long_delay = config.get_int("strategy", "long_delay", 3) as usize;
            let short_delay = config.get_int("strategy", "short_delay", 3) as usize;
            Box::new(DelayedSmaCrossover::new(
                shorter,
                longer,
                long_delay,
                short_delay,
                sizing,
            )?)
        }
        StrategyKind::SmaCrossover => {
            Box::new(DelayedSmaCrossover::new(shorter, longer, 1, 1, sizing)?)
        }
        StrategyKind::SimpleMomentum => {
            let buy_window = config.get_int("strategy", "buy_window", 15) as usize;
            let sell_window = config.get_int("strategy", "sell_window", 5) as usize;
            Box::new(SimpleMomentum::new(buy_window, sell_window, sizing)?)
        }
    })
}

fn run_simulate(
    config_path: &PathBuf,
    strategy_override: Option<usize>,
    ticker_override: Option<&str>,
    exchange_override: Option<&str>,
    day_offset_override: Option<u32>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    for validate in [
        validate_simulation_config,
        validate_strategy_config,
        validate_data_config,
    ] {
        if let Err(e) = validate(&config) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let mut ledger = match build_ledger(&config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut strategy = match build_strategy(&config, strategy_override) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded strategy: {}", strategy.name());

    let base_path = config
        .get_string("data", "path")
        .unwrap_or_else(|| ".".to_string());
    let ticker = ticker_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "ticker"))
        .unwrap_or_else(|| "AAPL".to_string());
    let exchange = exchange_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "exchange"))
        .unwrap_or_else(|| "NASD".to_string());
    let day_offset =
        day_offset_override.unwrap_or_else(|| config.get_int("data", "day_offset", 0).max(0) as u32);

    eprintln!("Fetching ticks for {ticker} on {exchange} (day offset {day_offset})");
    let feed = CsvFeedAdapter::new(PathBuf::from(base_path));
    let series = match feed.fetch_ticks(&ticker, &exchange, day_offset) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Replaying {} ticks", series.len());

    let mut renderer = NullRenderer;
    let result = match run_simulation(&series, &mut ledger, strategy.as_mut(), &mut renderer) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_result(&result);
    ExitCode::SUCCESS
}

fn print_result(result: &SimulationResult) {
    println!("Strategy: {}", result.strategy_name);
    println!();

    if result.trade_log.is_empty() {
        println!("No trades executed.");
    } else {
        println!(
            "{:>5}  {:>5}  {:>8}  {:>10}  {:>12}  {:>12}  Notes",
            "Tick", "Type", "Shares", "Price", "Cash Delta", "Position $"
        );
        for trade in &result.trade_log {
            println!(
                "{:>5}  {:>5}  {:>8}  {:>10.2}  {:>12.2}  {:>12.2}  {}",
                trade.tick_index,
                trade.direction.to_string(),
                trade.shares,
                trade.price_per_share,
                trade.cash_delta,
                trade.position_value,
                trade.annotation
            );
        }
    }

    println!();
    println!("Trades:           {:>12}", result.trade_log.len());
    println!("Signals:          {:>12}", result.signals.len());
    println!("Cash:             {:>12.2}", result.ledger.cash);
    println!("Position:         {:>12}", result.ledger.position);
    println!("Position value:   {:>12.2}", result.ledger.position_value);
    println!("Commission total: {:>12.2}", result.ledger.commission_total);
    println!("Realized P&L:     {:>12.2}", result.ledger.realized_pl);
}

fn run_list_strategies() -> ExitCode {
    for (index, kind) in StrategyKind::ALL.iter().enumerate() {
        match kind.build_default() {
            Ok(strategy) => println!("{index}: {kind} ({})", strategy.name()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    for validate in [
        validate_simulation_config,
        validate_strategy_config,
        validate_data_config,
    ] {
        if let Err(e) = validate(&config) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    println!("Configuration OK");
    ExitCode::SUCCESS
}
