//! Tick/millisecond conversions
//!
//! Periods are plain tick counts. These helpers turn human time into ticks
//! at a given tick rate; they are configuration aids, not a clock.

use crate::config::CFG_TICK_RATE_HZ;
use crate::error::{OsError, OsResult};
use crate::types::Ticks;

/// Period in ticks at [`CFG_TICK_RATE_HZ`] for a duration in milliseconds
///
/// # Returns
/// * `Err(OsError::PeriodInvalid)` - Rounds to zero ticks or overflows [`Ticks`]
#[inline]
pub fn period_from_ms(ms: u32) -> OsResult<Ticks> {
    period_from_ms_at(ms, CFG_TICK_RATE_HZ)
}

/// Period in ticks at `rate_hz`, rounded to the nearest tick
pub fn period_from_ms_at(ms: u32, rate_hz: u32) -> OsResult<Ticks> {
    if rate_hz == 0 {
        return Err(OsError::TickRateInvalid);
    }

    let ticks = (ms as u64 * rate_hz as u64 + 500) / 1000;
    match Ticks::try_from(ticks) {
        Ok(0) | Err(_) => Err(OsError::PeriodInvalid),
        Ok(ticks) => Ok(ticks),
    }
}

/// Duration of `ticks` in milliseconds at [`CFG_TICK_RATE_HZ`]
#[inline]
pub fn ticks_to_ms(ticks: Ticks) -> u32 {
    (ticks as u32 * 1000) / CFG_TICK_RATE_HZ
}
