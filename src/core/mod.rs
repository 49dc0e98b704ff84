//! Core kernel modules
//!
//! Contains the timer queue, its tick handler and dispatcher, and the
//! configuration, error and task types they share.

pub mod config;
pub mod critical;
pub mod dispatch;
pub mod error;
pub mod queue;
pub mod task;
pub mod tick;
pub mod time;
pub mod types;
