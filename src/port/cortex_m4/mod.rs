//! Cortex-M4 port implementation
//!
//! Drives the timer queue from the SysTick exception.

use core::cell::Cell;

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::exception;
use ::critical_section::Mutex;
use portable_atomic::{AtomicU32, Ordering};

use crate::config::CFG_CPU_FREQ_HZ;
use crate::critical::critical_section;
use crate::error::{OsError, OsResult};
use crate::port::{systick_reload, TickSource};
use crate::tick::TickHandler;

/// Handler the SysTick exception forwards to
static TICK_HANDLER: Mutex<Cell<Option<&'static dyn TickHandler>>> = Mutex::new(Cell::new(None));

/// SysTick exceptions taken since start
static UPTIME: AtomicU32 = AtomicU32::new(0);

/// Ticks taken by the SysTick port since start
#[inline]
pub fn uptime_ticks() -> u32 {
    UPTIME.load(Ordering::Relaxed)
}

/// Initialize SysTick timer for system tick generation
///
/// # Arguments
/// * `reload` - Reload value, one less than the counts per tick
pub fn os_cpu_systick_init(reload: u32) {
    let mut p = unsafe { cortex_m::Peripherals::steal() };

    p.SYST.set_reload(reload);
    p.SYST.clear_current();
    p.SYST.set_clock_source(SystClkSource::Core);
    p.SYST.enable_interrupt();
    p.SYST.enable_counter();
}

/// SysTick as the kernel tick source
///
/// There is one SysTick per core, so only one handler can ever be bound.
pub struct SysTickSource {
    core_clock_hz: u32,
}

impl SysTickSource {
    /// Tick source for a core running at `core_clock_hz`
    pub const fn new(core_clock_hz: u32) -> Self {
        Self { core_clock_hz }
    }
}

impl Default for SysTickSource {
    fn default() -> Self {
        Self::new(CFG_CPU_FREQ_HZ)
    }
}

impl TickSource for SysTickSource {
    fn start(&mut self, handler: &'static dyn TickHandler, rate_hz: u32) -> OsResult<()> {
        let reload = systick_reload(self.core_clock_hz, rate_hz)?;

        let bound = critical_section(|cs| {
            let slot = TICK_HANDLER.borrow(cs);
            if slot.get().is_some() {
                return false;
            }
            slot.set(Some(handler));
            true
        });
        if !bound {
            return Err(OsError::TickSourceBusy);
        }

        os_cpu_systick_init(reload);
        Ok(())
    }
}

/// SysTick interrupt handler
#[exception]
fn SysTick() {
    UPTIME.fetch_add(1, Ordering::Relaxed);

    if let Some(handler) = critical_section(|cs| TICK_HANDLER.borrow(cs).get()) {
        handler.on_tick();
    }
}
