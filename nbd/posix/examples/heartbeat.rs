//! Two delays with different periods polled against one shared counter.
//! The hosted equivalent of the classic polled LED blink loop.

use nbd_core::Delay;
use nbd_posix::Ticker;

fn main() {
    let ticker = Ticker::start().expect("ticker rate is fixed and nonzero");

    let mut beat = Delay::new(ticker.counter(), 250);
    let mut report = Delay::new(ticker.counter(), 1_000);
    let mut beats = 0u32;

    while beats < 12 {
        if beat.check() {
            beats += 1;
            println!("beat {} at {}", beats, ticker.counter().now());
        }
        if report.check() {
            println!("-- one second mark at {}", ticker.counter().now());
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}
