//! Port traits at the system boundary.

pub mod config_port;
pub mod feed_port;
pub mod render_port;
