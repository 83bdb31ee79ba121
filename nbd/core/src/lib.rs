#![no_std]
#![forbid(unsafe_code)]

//! # NBD Core
//!
//! Non-blocking millisecond delay primitives for embedded systems.
//! A free-running [`TickCounter`] is advanced once per millisecond from a
//! periodic interrupt, and any number of [`Delay`] instances poll it to ask
//! "has my interval elapsed?" without ever halting the processor.
//!
//! Elapsed-time arithmetic uses wrapping `u32` subtraction, so delays remain
//! correct when the counter wraps past `u32::MAX` (roughly every 49.7 days),
//! as long as a single interval never exceeds `u32::MAX` milliseconds.
//!
//! Platform ports arm the counter: `nbd-cortex-m` drives it from the SysTick
//! exception, `nbd-posix` from a dedicated 1 kHz thread for hosted targets.

#[cfg(any(feature = "std", test))]
extern crate std;

use core::fmt;

pub mod delay;
pub mod tick;
pub mod time;

pub use delay::*;
pub use tick::*;
pub use time::*;

/// NBD crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the NBD crates
pub type NbdResult<T> = Result<T, NbdError>;

/// Error types for tick-source initialization
///
/// All delay operations are total functions; errors can only arise while
/// arming the hardware tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NbdError {
    /// Core clock frequency query returned zero (or below 1 kHz), so a
    /// 1 ms tick period cannot be derived
    ZeroClockFrequency,
    /// The hardware timer rejected the computed reload value
    ReloadOutOfRange,
}

impl fmt::Display for NbdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NbdError::ZeroClockFrequency => write!(f, "clock frequency too low for a 1ms tick"),
            NbdError::ReloadOutOfRange => write!(f, "timer rejected the computed reload value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NbdError {}

#[cfg(feature = "defmt")]
impl defmt::Format for NbdError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            NbdError::ZeroClockFrequency => defmt::write!(fmt, "ZeroClockFrequency"),
            NbdError::ReloadOutOfRange => defmt::write!(fmt, "ReloadOutOfRange"),
        }
    }
}
