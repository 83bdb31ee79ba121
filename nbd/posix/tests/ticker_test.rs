//! End-to-end tests: delay instances polled against the live ticker thread.
//! Margins are generous; these assert ordering and firing, not precise rates.

use std::thread;
use std::time::{Duration, Instant};

use nbd_core::Delay;
use nbd_posix::Ticker;

/// Poll `delay` until it fires or `timeout` passes
fn poll_until_fire(delay: &mut Delay<'_, nbd_core::TickCounter>, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if delay.check() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

#[test]
fn delay_fires_under_live_ticker() {
    let ticker = Ticker::start().unwrap();
    let mut delay = Delay::new(ticker.counter(), 50);

    assert!(
        poll_until_fire(&mut delay, Duration::from_secs(5)),
        "50ms delay never fired under a live 1kHz ticker"
    );
}

#[test]
fn delay_rearms_and_fires_again() {
    let ticker = Ticker::start().unwrap();
    let mut delay = Delay::new(ticker.counter(), 30);

    assert!(poll_until_fire(&mut delay, Duration::from_secs(5)));
    assert!(poll_until_fire(&mut delay, Duration::from_secs(5)));
}

#[test]
fn long_delay_does_not_fire_early() {
    let ticker = Ticker::start().unwrap();
    let mut delay = Delay::new(ticker.counter(), 3_600_000);

    thread::sleep(Duration::from_millis(50));
    assert!(!delay.check());
}

#[test]
fn zero_interval_fires_immediately() {
    let ticker = Ticker::start().unwrap();
    let mut delay = Delay::new(ticker.counter(), 0);

    assert!(delay.check());
    assert!(delay.check());
}

#[test]
fn accelerated_rate_shortens_wall_time() {
    // At 10 kHz a "100ms" interval spans ~10ms of wall clock
    let ticker = Ticker::with_rate_hz(10_000).unwrap();
    let mut delay = Delay::new(ticker.counter(), 100);

    assert!(
        poll_until_fire(&mut delay, Duration::from_secs(5)),
        "accelerated delay never fired"
    );
}
