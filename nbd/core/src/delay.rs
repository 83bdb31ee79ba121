//! Poll-based delay instances with auto-rearm semantics

use crate::tick::TickSource;
use crate::time::Millis;

/// Non-blocking delay over a shared tick source
///
/// Holds an interval and a snapshot of the tick source taken at the last
/// reset. [`check`](Delay::check) compares the current count against the
/// snapshot with wrapping arithmetic, so the answer stays correct across
/// counter wraparound. On firing, the snapshot advances to "now", making a
/// regularly polled instance behave like a free-running periodic timer
/// rather than a one-shot.
///
/// Instances are plain values owned by the caller; many instances can track
/// independent intervals against the same tick source.
///
/// ```
/// use nbd_core::{Delay, TickCounter};
///
/// static TICKS: TickCounter = TickCounter::new();
///
/// let mut blink = Delay::new(&TICKS, 2);
/// assert!(!blink.check());
///
/// TICKS.on_tick();
/// TICKS.on_tick();
/// assert!(blink.check());
/// assert!(!blink.check()); // rearmed from the firing instant
/// ```
pub struct Delay<'a, T: TickSource> {
    ticks: &'a T,
    interval_ms: u32,
    last_reset: Millis,
}

impl<'a, T: TickSource> Delay<'a, T> {
    /// Create a delay counting from "now"
    ///
    /// Equivalent to setting the interval and then calling
    /// [`reset`](Delay::reset). An interval of 0 makes every `check` fire.
    pub fn new(ticks: &'a T, interval_ms: u32) -> Self {
        let mut delay = Self {
            ticks,
            interval_ms,
            last_reset: Millis::ZERO,
        };
        delay.reset();
        delay
    }

    /// Overwrite the interval without resetting the timestamp
    ///
    /// A shortened interval takes effect on the next [`check`](Delay::check),
    /// even mid-period. Callers that want the new interval to start counting
    /// from scratch call [`reset`](Delay::reset) as well.
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Current interval in milliseconds
    pub fn interval(&self) -> u32 {
        self.interval_ms
    }

    /// Restart the delay period from the current tick count
    pub fn reset(&mut self) {
        self.last_reset = self.ticks.now();
    }

    /// Poll whether the interval has elapsed since the last reset
    ///
    /// Returns `true` and advances the reset snapshot to "now" when at least
    /// `interval` milliseconds have passed; returns `false` and leaves the
    /// snapshot untouched otherwise. Never blocks.
    pub fn check(&mut self) -> bool {
        let now = self.ticks.now();
        if now.elapsed_since(self.last_reset) >= self.interval_ms {
            self.last_reset = now;
            true
        } else {
            false
        }
    }
}
