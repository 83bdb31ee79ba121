//! # NBD POSIX port
//!
//! Hosted stand-in for the hardware tick interrupt: a dedicated thread
//! advances a shared [`TickCounter`] at 1 kHz (or a caller-chosen rate for
//! accelerated tests). Uses monotonic absolute deadlines rather than
//! relative sleeps, so the tick rate does not drift with callback overhead.
//!
//! ```
//! use nbd_core::Delay;
//! use nbd_posix::Ticker;
//!
//! let ticker = Ticker::start().unwrap();
//! let mut delay = Delay::new(ticker.counter(), 10_000);
//! assert!(!delay.check());
//! # drop(delay);
//! # drop(ticker);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use nbd_core::TickCounter;
use thiserror::Error;

/// Millisecond resolution, matching the hardware ports
const DEFAULT_RATE_HZ: u32 = 1_000;

/// Nanoseconds per second
const NSEC_PER_SEC: u64 = 1_000_000_000;

/// Errors arming the hosted ticker
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TickerError {
    /// Hosted analogue of a zero clock frequency: no tick period can be
    /// derived from a rate of zero
    #[error("a tick rate of 0 Hz cannot be achieved")]
    ZeroRate,
}

/// Ticker thread advancing a shared [`TickCounter`]
///
/// The counter is only reachable through a successfully started `Ticker`,
/// so no delay instance can poll a source that is not being driven.
/// Stops on drop.
pub struct Ticker {
    counter: Arc<TickCounter>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start a 1 kHz ticker
    pub fn start() -> Result<Self, TickerError> {
        Self::with_rate_hz(DEFAULT_RATE_HZ)
    }

    /// Start a ticker at an arbitrary rate
    ///
    /// Rates other than 1 kHz make one "millisecond" of counter time span a
    /// different wall-clock period; tests use this to run delay scenarios
    /// faster than real time.
    pub fn with_rate_hz(rate_hz: u32) -> Result<Self, TickerError> {
        if rate_hz == 0 {
            return Err(TickerError::ZeroRate);
        }
        let tick_period = Duration::from_nanos(NSEC_PER_SEC / u64::from(rate_hz));

        let counter = Arc::new(TickCounter::new());
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let counter = Arc::clone(&counter);
            let running = Arc::clone(&running);
            thread::spawn(move || ticker_thread(&counter, &running, tick_period))
        };

        log::debug!("ticker started at {} Hz", rate_hz);
        Ok(Self {
            counter,
            running,
            handle: Some(handle),
        })
    }

    /// The counter this ticker is driving
    pub fn counter(&self) -> &TickCounter {
        &self.counter
    }

    /// Stop the ticker thread and wait for it to exit
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            log::debug!("ticker stopped at {}", self.counter.now());
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleeps until the next absolute deadline, then advances the counter
///
/// Sleeping toward absolute instants instead of for relative durations keeps
/// the long-run rate accurate even when individual wakeups are late.
fn ticker_thread(counter: &TickCounter, running: &AtomicBool, tick_period: Duration) {
    let mut next_tick = Instant::now();

    while running.load(Ordering::Relaxed) {
        next_tick += tick_period;

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }

        counter.on_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_rejected() {
        assert!(matches!(
            Ticker::with_rate_hz(0),
            Err(TickerError::ZeroRate)
        ));
    }

    #[test]
    fn ticker_advances_the_counter() {
        let ticker = Ticker::with_rate_hz(1_000).unwrap();
        thread::sleep(Duration::from_millis(100));
        let count = ticker.counter().now().raw();
        // ~100 ticks expected; allow wide margins for scheduler jitter
        assert!(count >= 20, "expected counter to advance, got {}", count);
    }

    #[test]
    fn stop_halts_the_counter() {
        let mut ticker = Ticker::with_rate_hz(1_000).unwrap();
        thread::sleep(Duration::from_millis(20));
        ticker.stop();

        let frozen = ticker.counter().now();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticker.counter().now(), frozen);
    }
}
