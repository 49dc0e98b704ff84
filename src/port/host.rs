//! Hosted tick source
//!
//! Stands in for the timer interrupt on a hosted build: a dedicated thread
//! calls the handler once per period, keeping a fixed schedule so sleep
//! jitter does not accumulate.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use portable_atomic::{AtomicBool, Ordering};

use crate::error::{OsError, OsResult};
use crate::port::TickSource;
use crate::tick::TickHandler;

/// Tick source backed by a timer thread
pub struct ThreadTickSource {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadTickSource {
    pub fn new() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Check whether the timer thread is running
    #[inline]
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Stop the timer thread and wait for it to exit
    ///
    /// # Returns
    /// * `Err(OsError::TickSourceFault)` - The handler panicked on the timer thread
    pub fn stop(&mut self) -> OsResult<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        self.stop.store(true, Ordering::Release);
        worker.join().map_err(|_| {
            crate::error!("tick thread panicked");
            OsError::TickSourceFault
        })
    }
}

impl Default for ThreadTickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for ThreadTickSource {
    fn start(&mut self, handler: &'static dyn TickHandler, rate_hz: u32) -> OsResult<()> {
        if rate_hz == 0 {
            return Err(OsError::TickRateInvalid);
        }
        if self.worker.is_some() {
            return Err(OsError::TickSourceBusy);
        }

        let period = Duration::from_nanos(1_000_000_000 / rate_hz as u64);
        let stop = Arc::clone(&self.stop);
        stop.store(false, Ordering::Release);

        let worker = thread::Builder::new()
            .name("eertos-tick".into())
            .spawn(move || {
                let mut next = Instant::now() + period;
                while !stop.load(Ordering::Acquire) {
                    let now = Instant::now();
                    if next > now {
                        thread::sleep(next - now);
                    }
                    handler.on_tick();
                    next += period;
                }
            })
            .map_err(|_| {
                crate::error!("tick thread spawn failed");
                OsError::TickSourceSpawn
            })?;

        self.worker = Some(worker);
        Ok(())
    }
}

impl Drop for ThreadTickSource {
    fn drop(&mut self) {
        // Callers that care about a handler panic call stop() first
        if self.stop().is_err() && !thread::panicking() {
            crate::warn!("tick thread panicked before drop");
        }
    }
}
