//! Free-running millisecond tick counter shared with an interrupt context

use core::cell::Cell;

use critical_section::Mutex;

use crate::time::Millis;

/// Source of monotonically advancing millisecond instants
///
/// Implemented by [`TickCounter`] for real tick sources; tests can implement
/// it on a manually driven clock to step time deterministically.
pub trait TickSource {
    /// Current instant; must never move backwards except by wrapping
    fn now(&self) -> Millis;
}

/// Free-running millisecond counter
///
/// One writer (the periodic interrupt, via [`on_tick`](TickCounter::on_tick))
/// and any number of readers (delay instances, via
/// [`now`](TickCounter::now)). Every access goes through a critical section
/// so a reader can never observe a half-updated count torn by the tick
/// interrupt firing mid-read.
///
/// `new` is const, so the counter for a platform port lives in a `static`:
///
/// ```
/// use nbd_core::TickCounter;
///
/// static TICKS: TickCounter = TickCounter::new();
///
/// TICKS.on_tick(); // from the tick interrupt handler
/// let now = TICKS.now();
/// # assert_eq!(now.raw(), 1);
/// ```
pub struct TickCounter {
    millis: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self {
            millis: Mutex::new(Cell::new(0)),
        }
    }

    /// Advance the counter by one millisecond
    ///
    /// Called once per firing of the periodic tick interrupt. O(1); wraps
    /// silently at 2^32.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let millis = self.millis.borrow(cs);
            millis.set(millis.get().wrapping_add(1));
        });
    }

    /// Read the current count indivisibly
    pub fn now(&self) -> Millis {
        Millis(critical_section::with(|cs| self.millis.borrow(cs).get()))
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for TickCounter {
    fn now(&self) -> Millis {
        TickCounter::now(self)
    }
}
