//! Core simulation domain: tick storage, indicators, ledger, strategies.

pub mod tick;
pub mod indicator;
pub mod ledger;
pub mod trade;
pub mod strategy;
pub mod simulation;
pub mod config_validation;
pub mod error;
