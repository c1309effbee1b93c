//! Trade records and chart signal marks emitted during a simulation run.

use std::fmt;

/// Direction of a trade or open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    Long,
    Short,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "Long"),
            TradeDirection::Short => write!(f, "Short"),
        }
    }
}

/// A buy/sell mark for the renderer, appended in tick order. The engine
/// never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeSignal {
    pub tick_index: usize,
    pub direction: TradeDirection,
}

/// One executed trade, appended to the run's trade log.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub tick_index: usize,
    pub strategy_name: String,
    pub direction: TradeDirection,
    /// Share count as transacted (magnitude).
    pub shares: i64,
    pub price_per_share: f64,
    /// Signed cash movement from the ledger's perspective: negative for a
    /// buy, positive for a sell/short.
    pub cash_delta: f64,
    /// Cash-equivalent of the full position after this trade.
    pub position_value: f64,
    /// Strategy-specific indicator snapshot at this tick.
    pub annotation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(TradeDirection::Long.to_string(), "Long");
        assert_eq!(TradeDirection::Short.to_string(), "Short");
    }

    #[test]
    fn signal_fields() {
        let signal = TradeSignal {
            tick_index: 42,
            direction: TradeDirection::Short,
        };
        assert_eq!(signal.tick_index, 42);
        assert_eq!(signal.direction, TradeDirection::Short);
    }
}
