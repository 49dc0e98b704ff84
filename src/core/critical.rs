//! Critical section handling
//!
//! Two layers of exclusion protect the timer queue:
//!
//! - [`critical_section`] wraps the `critical-section` crate. It is held only
//!   for a handful of instructions around each read or write of slot state,
//!   so slots are never observed half-updated.
//! - [`TickMask`] is held while a task body runs in atomic dispatch mode.
//!   While it is engaged the tick handler drops incoming ticks instead of
//!   applying them, the way a stalled task costs ticks on the reference
//!   firmware.

use core::cell::Cell;

use ::critical_section::{CriticalSection, Mutex};

/// Execute a closure with interrupts disabled
///
/// The closure receives the critical section token needed to reach
/// [`Mutex`]-protected data.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection<'_>) -> R,
{
    ::critical_section::with(f)
}

/// Check if currently executing in an ISR context
#[inline]
pub fn is_isr_context() -> bool {
    #[cfg(target_arch = "arm")]
    {
        !matches!(
            cortex_m::peripheral::SCB::vect_active(),
            cortex_m::peripheral::scb::VectActive::ThreadMode
        )
    }

    #[cfg(not(target_arch = "arm"))]
    {
        false
    }
}

/// Software mask for the tick interrupt
pub struct TickMask {
    masked: Mutex<Cell<bool>>,
}

impl TickMask {
    /// Create an unmasked tick mask
    pub const fn new() -> Self {
        Self {
            masked: Mutex::new(Cell::new(false)),
        }
    }

    /// Check whether ticks are currently masked
    #[inline(always)]
    pub fn is_masked(&self, cs: CriticalSection<'_>) -> bool {
        self.masked.borrow(cs).get()
    }

    /// Mask ticks until the returned guard is dropped
    #[inline]
    pub fn engage(&self) -> TickMaskGuard<'_> {
        let previous = critical_section(|cs| self.masked.borrow(cs).replace(true));
        TickMaskGuard { mask: self, previous }
    }
}

impl Default for TickMask {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for a [`TickMask`] state change
///
/// Restores the previous mask state when dropped, so guards nest.
pub struct TickMaskGuard<'a> {
    mask: &'a TickMask,
    previous: bool,
}

impl Drop for TickMaskGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        critical_section(|cs| self.mask.masked.borrow(cs).set(self.previous));
    }
}
