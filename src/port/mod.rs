//! Port layer - tick sources
//!
//! A tick source is the periodic interrupt that drives the timer queue. It
//! owns no scheduling state; it only calls [`TickHandler::on_tick`] at a
//! fixed rate once started.

#[cfg(target_arch = "arm")]
pub mod cortex_m4;

#[cfg(target_arch = "arm")]
pub use cortex_m4::*;

#[cfg(feature = "std")]
pub mod host;

#[cfg(feature = "std")]
pub use host::ThreadTickSource;

mod manual;

pub use manual::ManualTickSource;

use crate::config::CFG_SYSTICK_RELOAD_MAX;
use crate::error::{OsError, OsResult};
use crate::tick::TickHandler;

/// A periodic interrupt source
pub trait TickSource {
    /// Begin calling `handler` at `rate_hz`
    ///
    /// # Returns
    /// * `Err(OsError::TickRateInvalid)` - The source cannot produce `rate_hz`
    /// * `Err(OsError::TickSourceBusy)` - The source is already running
    fn start(&mut self, handler: &'static dyn TickHandler, rate_hz: u32) -> OsResult<()>;
}

/// SysTick reload value for `rate_hz` ticks from a `core_clock_hz` clock
///
/// # Example
/// For a 16MHz clock at 50Hz: 16_000_000 / 50 = 320_000 counts per tick
pub fn systick_reload(core_clock_hz: u32, rate_hz: u32) -> OsResult<u32> {
    if rate_hz == 0 {
        return Err(OsError::TickRateInvalid);
    }
    let cnts = core_clock_hz / rate_hz;
    if cnts < 2 || cnts - 1 > CFG_SYSTICK_RELOAD_MAX {
        return Err(OsError::TickRateInvalid);
    }
    Ok(cnts - 1)
}
