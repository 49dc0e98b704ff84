//! Compile-time configuration for the kernel
//!
//! These constants fix the tick frequency every task period is measured
//! against, and the defaults a new timer queue is built with.

use crate::types::DispatchMode;

/// System tick rate in Hz (the frequency F all periods are counted in)
pub const CFG_TICK_RATE_HZ: u32 = 50;

/// Core clock feeding the SysTick port
pub const CFG_CPU_FREQ_HZ: u32 = 16_000_000;

/// Largest SysTick reload value (24-bit counter)
pub const CFG_SYSTICK_RELOAD_MAX: u32 = 0x00FF_FFFF;

/// Dispatch mode used by [`TimerQueue::new`](crate::TimerQueue::new)
pub const CFG_DISPATCH_MODE: DispatchMode = DispatchMode::Atomic;
