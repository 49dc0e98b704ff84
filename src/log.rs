//! Kernel logging macros
//!
//! Levels used by the timer queue:
//! - `info`: queue started, with slot count and tick rate
//! - `debug`: a slot was registered, with its period
//! - `trace`: a slot fired, or a tick arrived while a task body held the mask
//! - `warn`: dispatch called from an interrupt or while another pass runs,
//!   a hosted tick thread found dead on drop
//! - `error`: a tick source refused to start, the tick thread could not be
//!   spawned or panicked
//!
//! With the `defmt` feature off every macro expands to nothing; with it on,
//! arguments must implement `defmt::Format`.

/// Slot registration
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

/// Queue start
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

/// Tick source start, spawn and thread failures
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { defmt::error!($($arg)*) };
}

/// Per-fire and lost-tick events; one line per tick at worst
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => { defmt::trace!($($arg)*) };
}

/// Rejected dispatch calls
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! debug { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! info { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! error { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! trace { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! warn { ($($arg:tt)*) => {}; }
