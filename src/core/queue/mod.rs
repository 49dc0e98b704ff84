//! Timer queue
//!
//! The timer queue is the only state shared between the tick interrupt and
//! the cooperative main loop: one slot per task identifier, each holding a
//! task, its remaining countdown and its reload period.
//!
//! The tick side lives in [`tick`](crate::core::tick) and the main-loop side
//! in [`dispatch`](crate::core::dispatch); this module covers construction,
//! registration, start-up and inspection.

mod slot;

pub(crate) use slot::Slot;

use core::cell::RefCell;
use core::marker::PhantomData;

use ::critical_section::Mutex;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{CFG_DISPATCH_MODE, CFG_TICK_RATE_HZ};
use crate::critical::{critical_section, TickMask};
use crate::error::{OsError, OsResult};
use crate::port::TickSource;
use crate::task::{Task, TaskId};
use crate::types::{DispatchMode, QueueStats, Ticks};

/// Live counters behind [`QueueStats`]
pub(crate) struct StatCounters {
    pub(crate) ticks_delivered: AtomicU32,
    pub(crate) ticks_lost: AtomicU32,
    pub(crate) passes: AtomicU32,
    pub(crate) fired: AtomicU32,
}

impl StatCounters {
    const fn new() -> Self {
        Self {
            ticks_delivered: AtomicU32::new(0),
            ticks_lost: AtomicU32::new(0),
            passes: AtomicU32::new(0),
            fired: AtomicU32::new(0),
        }
    }

    fn snapshot(&self) -> QueueStats {
        QueueStats {
            ticks_delivered: self.ticks_delivered.load(Ordering::Relaxed),
            ticks_lost: self.ticks_lost.load(Ordering::Relaxed),
            passes: self.passes.load(Ordering::Relaxed),
            fired: self.fired.load(Ordering::Relaxed),
        }
    }
}

/// Fixed-capacity timer queue indexed by task identifier
///
/// `N` must equal `T::COUNT`. The check runs in [`TimerQueue::new`], so a
/// mismatched `static` queue fails const evaluation instead of compiling.
///
/// # Lifecycle
/// 1. Build the queue (usually as a `static`).
/// 2. [`register`](Self::register) every task.
/// 3. [`start`](Self::start) it with a tick source.
/// 4. Call [`dispatch`](Self::dispatch) from the main loop, forever.
pub struct TimerQueue<T: TaskId, const N: usize> {
    pub(crate) slots: Mutex<RefCell<[Slot; N]>>,
    pub(crate) tick_mask: TickMask,
    pub(crate) mode: DispatchMode,
    pub(crate) started: AtomicBool,
    pub(crate) dispatching: AtomicBool,
    pub(crate) stats: StatCounters,
    _ids: PhantomData<fn() -> T>,
}

impl<T: TaskId, const N: usize> TimerQueue<T, N> {
    /// Create a queue using [`CFG_DISPATCH_MODE`]
    ///
    /// # Panics
    /// If `N != T::COUNT`. In a `static` initializer this is a compile error.
    pub const fn new() -> Self {
        Self::with_mode(CFG_DISPATCH_MODE)
    }

    /// Create a queue with an explicit dispatch mode
    ///
    /// # Panics
    /// If `N != T::COUNT`.
    pub const fn with_mode(mode: DispatchMode) -> Self {
        assert!(
            N == T::COUNT,
            "timer queue capacity must equal the number of task identifiers"
        );
        Self::build(mode)
    }

    /// Create a queue, reporting a capacity mismatch as an error
    ///
    /// # Returns
    /// * `Err(OsError::QueueCapacity)` - `N` differs from `T::COUNT`
    pub fn try_new() -> OsResult<Self> {
        if N != T::COUNT {
            return Err(OsError::QueueCapacity);
        }
        Ok(Self::build(CFG_DISPATCH_MODE))
    }

    const fn build(mode: DispatchMode) -> Self {
        Self {
            slots: Mutex::new(RefCell::new([Slot::EMPTY; N])),
            tick_mask: TickMask::new(),
            mode,
            started: AtomicBool::new(false),
            dispatching: AtomicBool::new(false),
            stats: StatCounters::new(),
            _ids: PhantomData,
        }
    }

    /// Bind a task to a slot
    ///
    /// Sets both the countdown and the reload value to `period`, so the
    /// first firing happens one full period after start. Registering the
    /// same identifier again replaces the previous task and period.
    ///
    /// # Arguments
    /// * `id` - Slot to fill
    /// * `task` - Task body
    /// * `period` - Ticks between firings (must be non-zero)
    ///
    /// # Returns
    /// * `Err(OsError::PeriodInvalid)` - `period` is zero
    /// * `Err(OsError::TaskInvalid)` - `id` maps outside the queue
    /// * `Err(OsError::OsRunning)` - The queue was already started
    pub fn register(&self, id: T, task: &'static dyn Task, period: Ticks) -> OsResult<()> {
        if period == 0 {
            return Err(OsError::PeriodInvalid);
        }

        let index = id.index();
        if index >= N {
            return Err(OsError::TaskInvalid);
        }

        critical_section(|cs| {
            // Checked under the same section start() flips the flag in
            if self.started.load(Ordering::Acquire) {
                return Err(OsError::OsRunning);
            }
            self.slots.borrow_ref_mut(cs)[index].assign(task, period);
            Ok(())
        })?;

        crate::debug!("slot {} registered, period {} ticks", index, period);
        Ok(())
    }

    /// Start tick delivery at [`CFG_TICK_RATE_HZ`]
    ///
    /// # Returns
    /// * `Err(OsError::OsRunning)` - Already started
    /// * Any error the tick source reports; the queue stays unstarted
    pub fn start<S>(&'static self, source: &mut S) -> OsResult<()>
    where
        S: TickSource + ?Sized,
    {
        self.start_at(source, CFG_TICK_RATE_HZ)
    }

    /// Start tick delivery at an explicit rate
    pub fn start_at<S>(&'static self, source: &mut S, rate_hz: u32) -> OsResult<()>
    where
        S: TickSource + ?Sized,
    {
        let was_started = critical_section(|_cs| self.started.swap(true, Ordering::AcqRel));
        if was_started {
            return Err(OsError::OsRunning);
        }

        if let Err(err) = source.start(self, rate_hz) {
            crate::error!("tick source failed to start: {}", err);
            self.started.store(false, Ordering::Release);
            return Err(err);
        }

        crate::info!("timer queue started, {} slots at {} Hz", N, rate_hz);
        Ok(())
    }

    /// Check whether the queue has been started
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Dispatch mode this queue was built with
    #[inline]
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Queue capacity
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Remaining ticks before `id` is due, or `None` if the slot is empty
    pub fn remaining(&self, id: T) -> Option<Ticks> {
        self.with_slot(id, Slot::remaining)
    }

    /// Reload period of `id`, or `None` if the slot is empty
    pub fn period(&self, id: T) -> Option<Ticks> {
        self.with_slot(id, Slot::period)
    }

    /// Check whether a task is bound to `id`
    pub fn is_registered(&self, id: T) -> bool {
        self.with_slot(id, |slot| Some(slot.is_registered()))
            .unwrap_or(false)
    }

    /// Snapshot of the queue counters
    pub fn stats(&self) -> QueueStats {
        self.stats.snapshot()
    }

    fn with_slot<R>(&self, id: T, f: impl FnOnce(&Slot) -> Option<R>) -> Option<R> {
        let index = id.index();
        if index >= N {
            return None;
        }
        critical_section(|cs| f(&self.slots.borrow_ref(cs)[index]))
    }
}
