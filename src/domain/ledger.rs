//! Cash/position/commission bookkeeping and exposure-limit checks.
//!
//! The ledger is mechanism only: `execute_long`/`execute_short` apply deltas
//! unconditionally. Whether a trade is allowed belongs to the strategy, which
//! consults `check_long_within_limits`/`check_short_within_limits` before
//! executing.

use super::error::IntrasimError;
use super::tick::TickSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub cash: f64,
    pub cash_initial: f64,
    /// Open position in shares, signed (negative = short).
    pub position: i64,
    /// Cash-equivalent of the position: accumulated at trade prices during a
    /// run, marked to the final tick's close by `post_run`.
    pub position_value: f64,
    pub commission_per_trade: f64,
    pub commission_total: f64,
    pub realized_pl: f64,
    pub max_long_exposure: f64,
    pub max_short_exposure: f64,
}

impl Ledger {
    /// Exposure limits are pinned to ±cash_initial at creation and are not
    /// reconfigurable mid-run.
    pub fn new(cash_initial: f64, commission_per_trade: f64) -> Result<Self, IntrasimError> {
        if cash_initial <= 0.0 {
            return Err(IntrasimError::InvalidConfiguration {
                reason: format!("initial cash must be positive, got {cash_initial}"),
            });
        }
        if commission_per_trade < 0.0 {
            return Err(IntrasimError::InvalidConfiguration {
                reason: format!("commission must be non-negative, got {commission_per_trade}"),
            });
        }
        Ok(Ledger {
            cash: cash_initial,
            cash_initial,
            position: 0,
            position_value: 0.0,
            commission_per_trade,
            commission_total: 0.0,
            realized_pl: 0.0,
            max_long_exposure: cash_initial,
            max_short_exposure: -cash_initial,
        })
    }

    /// Reset to the initial state before a run, independent of any prior run.
    pub fn pre_run(&mut self) {
        self.cash = self.cash_initial;
        self.position = 0;
        self.position_value = 0.0;
        self.commission_total = 0.0;
        self.realized_pl = 0.0;
    }

    /// Whether adding `additional_shares` long at the price of `tick_index`
    /// keeps the position value within the long exposure limit.
    pub fn check_long_within_limits(
        &self,
        current_position_value: f64,
        series: &TickSeries,
        tick_index: usize,
        additional_shares: i64,
    ) -> Result<bool, IntrasimError> {
        let price = series.close(tick_index)?;
        Ok(current_position_value + additional_shares as f64 * price <= self.max_long_exposure)
    }

    /// Whether adding `additional_shares` short at the price of `tick_index`
    /// keeps the position value within the short exposure limit.
    pub fn check_short_within_limits(
        &self,
        current_position_value: f64,
        series: &TickSeries,
        tick_index: usize,
        additional_shares: i64,
    ) -> Result<bool, IntrasimError> {
        let price = series.close(tick_index)?;
        Ok(current_position_value - additional_shares as f64 * price >= self.max_short_exposure)
    }

    /// Buy `shares` at the close of `tick_index`. One commission per call.
    ///
    /// The price lookup happens before any field is touched, so a failing
    /// call leaves the ledger unchanged.
    pub fn execute_long(
        &mut self,
        series: &TickSeries,
        tick_index: usize,
        shares: i64,
    ) -> Result<(), IntrasimError> {
        let price = series.close(tick_index)?;
        let notional = shares as f64 * price;
        self.cash -= notional + self.commission_per_trade;
        self.position += shares;
        self.position_value += notional;
        self.commission_total += self.commission_per_trade;
        Ok(())
    }

    /// Sell/short `shares` at the close of `tick_index`. One commission per
    /// call.
    pub fn execute_short(
        &mut self,
        series: &TickSeries,
        tick_index: usize,
        shares: i64,
    ) -> Result<(), IntrasimError> {
        let price = series.close(tick_index)?;
        let notional = shares as f64 * price;
        self.cash += notional - self.commission_per_trade;
        self.position -= shares;
        self.position_value -= notional;
        self.commission_total += self.commission_per_trade;
        Ok(())
    }

    /// Mark the position to the final tick's close and compute realized P&L.
    /// Commission is already debited per trade and is not taken again here.
    pub fn post_run(&mut self, series: &TickSeries) -> Result<(), IntrasimError> {
        let last = series.last_index()?;
        let price = series.close(last)?;
        self.position_value = self.position as f64 * price;
        self.realized_pl = self.cash - self.cash_initial + self.position_value;
        Ok(())
    }
}
