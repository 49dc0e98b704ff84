//! Core type definitions for the kernel

/// Tick counter type (countdowns and periods)
pub type Ticks = u16;

/// Event counter type (statistics)
pub type OsCtr = u32;

/// How a dispatch pass treats ticks while callbacks run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DispatchMode {
    /// Ticks are masked while each task body runs.
    ///
    /// A callback that runs for K tick intervals makes every other slot
    /// lag by K ticks; the lost ticks show up in [`QueueStats::ticks_lost`].
    Atomic = 0,
    /// Ticks are never masked. Slow callbacks delay later slots in the
    /// same pass but no longer cost ticks.
    Released = 1,
}

/// Snapshot of timer queue counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueStats {
    /// Ticks that reached the tick handler, lost ones included
    pub ticks_delivered: OsCtr,
    /// Ticks dropped because a dispatch pass had them masked
    pub ticks_lost: OsCtr,
    /// Completed dispatch passes
    pub passes: OsCtr,
    /// Callback invocations
    pub fired: OsCtr,
}

impl QueueStats {
    /// Ticks that actually decremented the queue
    #[inline]
    pub fn ticks_applied(&self) -> OsCtr {
        self.ticks_delivered.wrapping_sub(self.ticks_lost)
    }
}
