//! Software tick source
//!
//! Delivers ticks only when asked. Used to simulate the tick interrupt on
//! the host, and to inject ticks from inside tasks to model a tick that
//! fires while a dispatch pass is running.

use crate::error::{OsError, OsResult};
use crate::port::TickSource;
use crate::tick::TickHandler;

/// Tick source driven by explicit [`fire`](Self::fire) calls
#[derive(Default)]
pub struct ManualTickSource {
    handler: Option<&'static dyn TickHandler>,
    rate_hz: u32,
}

impl ManualTickSource {
    pub const fn new() -> Self {
        Self {
            handler: None,
            rate_hz: 0,
        }
    }

    /// Deliver one tick. Returns `false` if the source was never started.
    pub fn fire(&self) -> bool {
        match self.handler {
            Some(handler) => {
                handler.on_tick();
                true
            }
            None => false,
        }
    }

    /// Deliver `count` ticks back to back
    pub fn fire_n(&self, count: u32) -> bool {
        (0..count).all(|_| self.fire())
    }

    /// Check whether a handler is bound
    #[inline]
    pub fn is_running(&self) -> bool {
        self.handler.is_some()
    }

    /// Rate the source was started at (0 before start)
    #[inline]
    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }
}

impl TickSource for ManualTickSource {
    fn start(&mut self, handler: &'static dyn TickHandler, rate_hz: u32) -> OsResult<()> {
        if rate_hz == 0 {
            return Err(OsError::TickRateInvalid);
        }
        if self.handler.is_some() {
            return Err(OsError::TickSourceBusy);
        }
        self.handler = Some(handler);
        self.rate_hz = rate_hz;
        Ok(())
    }
}
