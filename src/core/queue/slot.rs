//! Timer queue slot

use crate::task::Task;
use crate::types::Ticks;

/// Countdown state for one task identifier
///
/// An empty slot has no task and is ignored by both the tick handler and
/// the dispatcher, so "not in use" never reads as "due".
#[derive(Clone, Copy)]
pub(crate) struct Slot {
    task: Option<&'static dyn Task>,
    remaining: Ticks,
    period: Ticks,
}

impl Slot {
    pub(crate) const EMPTY: Slot = Slot {
        task: None,
        remaining: 0,
        period: 0,
    };

    /// Bind a task; the first firing comes one full period later
    #[inline]
    pub(crate) fn assign(&mut self, task: &'static dyn Task, period: Ticks) {
        debug_assert!(period > 0);
        self.task = Some(task);
        self.remaining = period;
        self.period = period;
    }

    #[inline(always)]
    pub(crate) fn is_registered(&self) -> bool {
        self.task.is_some()
    }

    /// Apply one tick. Saturates at zero.
    #[inline(always)]
    pub(crate) fn count_down(&mut self) {
        if self.is_registered() && self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    /// Task to run if the countdown has expired
    #[inline(always)]
    pub(crate) fn due(&self) -> Option<&'static dyn Task> {
        if self.remaining == 0 {
            self.task
        } else {
            None
        }
    }

    #[inline(always)]
    pub(crate) fn reload(&mut self) {
        self.remaining = self.period;
    }

    #[inline]
    pub(crate) fn remaining(&self) -> Option<Ticks> {
        self.task.map(|_| self.remaining)
    }

    #[inline]
    pub(crate) fn period(&self) -> Option<Ticks> {
        self.task.map(|_| self.period)
    }
}
