//! Millisecond instant type and wraparound-safe elapsed arithmetic

use core::fmt;

/// Millisecond-resolution instant, wrapping at 2^32
///
/// Values taken from a tick counter are only meaningful relative to other
/// values from the same counter; the interesting operation is
/// [`elapsed_since`](Millis::elapsed_since), which stays correct across
/// counter wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Millis(pub u32);

impl Millis {
    /// Zero instant (counter at reset)
    pub const ZERO: Self = Self(0);

    /// Maximum instant before wraparound
    pub const MAX: Self = Self(u32::MAX);

    /// Create an instant from a raw millisecond count
    pub const fn new(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the raw millisecond count
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Instant `ms` milliseconds later, modulo 2^32
    pub const fn wrapping_add_ms(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, modulo 2^32
    ///
    /// Wrapping subtraction keeps the result correct even when the counter
    /// has wrapped between the two readings, provided the true elapsed time
    /// does not exceed `u32::MAX` milliseconds (~49.7 days).
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Millis {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ms", self.0);
    }
}
