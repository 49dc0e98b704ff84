//! Tick handler
//!
//! Runs in interrupt context once per tick. Counts every registered slot
//! down by one, saturating at zero, and does nothing else: it never runs a
//! task and never touches a period. Cost is linear in the queue capacity.

use portable_atomic::Ordering;

use crate::critical::critical_section;
use crate::queue::TimerQueue;
use crate::task::TaskId;

/// Receiver of periodic ticks
///
/// Tick sources hold a `&'static dyn TickHandler` and call
/// [`on_tick`](Self::on_tick) at their configured rate.
pub trait TickHandler: Sync {
    fn on_tick(&self);
}

impl<T: TaskId, const N: usize> TimerQueue<T, N> {
    /// Apply one tick to the queue
    ///
    /// If a dispatch pass currently has ticks masked, the tick is dropped
    /// and counted in [`QueueStats::ticks_lost`](crate::QueueStats).
    pub fn tick(&self) {
        self.stats.ticks_delivered.fetch_add(1, Ordering::Relaxed);

        let applied = critical_section(|cs| {
            if self.tick_mask.is_masked(cs) {
                return false;
            }
            for slot in self.slots.borrow_ref_mut(cs).iter_mut() {
                slot.count_down();
            }
            true
        });

        if !applied {
            self.stats.ticks_lost.fetch_add(1, Ordering::Relaxed);
            crate::trace!("tick lost: dispatch pass holds the mask");
        }
    }
}

impl<T: TaskId, const N: usize> TickHandler for TimerQueue<T, N> {
    #[inline]
    fn on_tick(&self) {
        self.tick();
    }
}
