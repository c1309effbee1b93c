//! Concrete port implementations.

pub mod csv_feed_adapter;
pub mod file_config_adapter;
