//! Dispatcher
//!
//! Runs in the cooperative main loop. One pass walks the slots in
//! identifier order, runs every task whose countdown has reached zero and
//! reloads its period. Each slot read and reload sits in a short critical
//! section, so a tick arriving mid-scan is only deferred. In
//! [`DispatchMode::Atomic`] the tick mask also covers each task body, and
//! ticks landing there are lost.
//!
//! There is no catch-up: a countdown that hits zero holds there until a
//! pass services it, and several missed passes still yield one firing.

use portable_atomic::{AtomicBool, Ordering};

use crate::critical::{critical_section, is_isr_context};
use crate::queue::TimerQueue;
use crate::task::TaskId;
use crate::types::{DispatchMode, OsCtr};

/// Marks a pass in progress; cleared on drop so a panicking task
/// does not wedge the dispatcher on hosted builds.
struct PassGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PassGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<T: TaskId, const N: usize> TimerQueue<T, N> {
    /// Run one dispatch pass
    ///
    /// Must be called repeatedly by the caller's loop, at least once per
    /// tick, for tasks to fire on time. Each due task runs to completion
    /// before the next slot is checked.
    ///
    /// # Returns
    /// Number of tasks fired. A call from interrupt context, or one made
    /// while another pass is running (a task calling back into
    /// `dispatch`, or a second thread), fires nothing and returns 0.
    pub fn dispatch(&self) -> usize {
        if is_isr_context() {
            crate::warn!("dispatch called from interrupt context");
            return 0;
        }

        let Some(_pass) = PassGuard::enter(&self.dispatching) else {
            crate::warn!("dispatch pass already running, call ignored");
            return 0;
        };

        let fired = self.scan_and_fire();

        self.stats.fired.fetch_add(fired as OsCtr, Ordering::Relaxed);
        self.stats.passes.fetch_add(1, Ordering::Relaxed);
        fired
    }

    /// Dispatch forever, calling `idle` after every pass
    ///
    /// `idle` is where the application's own main-loop work goes. Hosted
    /// builds may also sleep or yield there, as long as passes still come
    /// at least once per tick.
    pub fn run<F>(&self, mut idle: F) -> !
    where
        F: FnMut(),
    {
        loop {
            self.dispatch();
            idle();
        }
    }

    fn scan_and_fire(&self) -> usize {
        let mut fired = 0;

        for index in 0..N {
            let due = critical_section(|cs| self.slots.borrow_ref(cs)[index].due());
            let Some(task) = due else {
                continue;
            };

            crate::trace!("slot {} due", index);
            match self.mode {
                DispatchMode::Atomic => {
                    let _masked = self.tick_mask.engage();
                    task.run();
                }
                DispatchMode::Released => task.run(),
            }

            critical_section(|cs| self.slots.borrow_ref_mut(cs)[index].reload());
            fired += 1;
        }

        fired
    }
}
