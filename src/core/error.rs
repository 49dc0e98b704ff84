//! Error types for the kernel
//!
//! Only configuration mistakes are errors: once the queue is running the
//! kernel has no failure path, and callbacks are assumed infallible.

/// Kernel error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum OsError {
    // ============ Queue errors ============
    /// Queue capacity does not match the number of task identifiers
    QueueCapacity = 26005,

    // ============ OS state errors ============
    /// OS is already running
    OsRunning = 24202,

    // ============ Task errors ============
    /// Task identifier maps outside the queue
    TaskInvalid = 29007,

    // ============ Timer errors ============
    /// Invalid (zero or oversized) period
    PeriodInvalid = 29504,

    // ============ Tick source errors ============
    /// Tick source cannot produce the requested rate
    TickRateInvalid = 29601,
    /// Tick source is already bound to a handler
    TickSourceBusy = 29602,
    /// Tick source could not create its timer context
    TickSourceSpawn = 29603,
    /// Tick source's timer context died while delivering a tick
    TickSourceFault = 29604,
}

/// Result type alias for kernel operations
pub type OsResult<T> = Result<T, OsError>;

impl OsError {
    /// Numeric error code
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}
