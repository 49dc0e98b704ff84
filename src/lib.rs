//! Cooperative timer-queue kernel in Rust
//!
//! A minimal kernel for small microcontrollers providing:
//! - A fixed-capacity timer queue, one slot per task identifier
//! - An interrupt-driven tick handler that counts every slot down
//! - A polled dispatcher that fires due tasks and reloads their period
//! - Tick sources for SysTick, manual simulation and hosted threads

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(feature = "std")]
extern crate std;

// ============ Critical Section ============

#[cfg(target_arch = "arm")]
mod cs_impl {
    use cortex_m::interrupt;
    use cortex_m::register::primask;
    use critical_section::{set_impl, Impl, RawRestoreState};

    struct SingleCoreCriticalSection;
    set_impl!(SingleCoreCriticalSection);

    unsafe impl Impl for SingleCoreCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let was_active = primask::read().is_active();
            interrupt::disable();
            was_active
        }

        unsafe fn release(was_active: RawRestoreState) {
            if was_active {
                unsafe { interrupt::enable() }
            }
        }
    }
}

// ============ Modules ============

pub mod log;
mod lang_items;

pub mod core;
pub mod port;

// ============ Re-exports ============

pub use crate::core::config;
pub use crate::core::config::*;
pub use crate::core::critical;
pub use crate::core::error;
pub use crate::core::error::{OsError, OsResult};
pub use crate::core::queue;
pub use crate::core::queue::TimerQueue;
pub use crate::core::task;
pub use crate::core::task::{Task, TaskId};
pub use crate::core::tick;
pub use crate::core::tick::TickHandler;
pub use crate::core::time;
pub use crate::core::types;
pub use crate::core::types::*;

pub use port::{ManualTickSource, TickSource};

#[cfg(target_arch = "arm")]
pub use port::SysTickSource;

#[cfg(feature = "std")]
pub use port::ThreadTickSource;

#[cfg(feature = "pac")]
pub use stm32_metapac as pac;
