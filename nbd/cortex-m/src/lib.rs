#![no_std]

//! # NBD Cortex-M port
//!
//! Drives the process-wide [`TickCounter`] from the SysTick exception at
//! 1 kHz. The application keeps ownership of its vector table: wire the
//! `SysTick` exception to [`on_tick`] and pass the `SYST` peripheral to
//! [`init`].
//!
//! ```ignore
//! use cortex_m_rt::{entry, exception};
//! use nbd_core::Delay;
//!
//! #[entry]
//! fn main() -> ! {
//!     let core = cortex_m::Peripherals::take().unwrap();
//!     let ticks = nbd_cortex_m::init(core.SYST, 64_000_000)
//!         .unwrap_or_else(|_| loop { cortex_m::asm::wfi() });
//!
//!     let mut blink = Delay::new(ticks, 500);
//!     loop {
//!         if blink.check() {
//!             // toggle the LED
//!         }
//!     }
//! }
//!
//! #[exception]
//! fn SysTick() {
//!     nbd_cortex_m::on_tick();
//! }
//! ```

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use nbd_core::{NbdError, NbdResult, TickCounter};

/// SysTick reload register is 24 bits wide
const SYST_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Process-wide millisecond counter, advanced by the SysTick exception
///
/// Obtain a reference through [`init`]; a successful return is the signal
/// that the counter is actually being driven.
static TICKS: TickCounter = TickCounter::new();

/// SysTick reload value for a 1 ms period at the given core clock
///
/// Fails with [`NbdError::ZeroClockFrequency`] when the clock is below
/// 1 kHz (including a frequency query that reported 0), and with
/// [`NbdError::ReloadOutOfRange`] when the reload would not fit the 24-bit
/// reload field. The latter guards the hardware contract on `set_reload`;
/// every 32-bit clock frequency divided by 1000 fits today.
pub fn reload_for(clock_hz: u32) -> NbdResult<u32> {
    let ticks_per_ms = clock_hz / 1_000;
    if ticks_per_ms == 0 {
        return Err(NbdError::ZeroClockFrequency);
    }
    if ticks_per_ms - 1 > SYST_MAX_RELOAD {
        return Err(NbdError::ReloadOutOfRange);
    }
    Ok(ticks_per_ms)
}

/// Configure SysTick for a 1 ms periodic interrupt and arm the counter
///
/// Consumes the `SYST` peripheral so the tick source cannot be reconfigured
/// behind the counter's back. The returned reference is the only way to
/// reach the process-wide counter, which keeps delay instances unusable
/// until initialization has succeeded.
///
/// The computed reload is `clock_hz / 1000` ticks per millisecond; errors
/// are as for [`reload_for`]. Timing problems here are unrecoverable for
/// anything built on the millisecond tick, so callers on bare metal
/// typically park the core on `Err` rather than continue.
pub fn init(mut syst: SYST, clock_hz: u32) -> NbdResult<&'static TickCounter> {
    let reload = reload_for(clock_hz)?;

    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    Ok(&TICKS)
}

/// Advance the counter; call from the `SysTick` exception handler
#[inline]
pub fn on_tick() {
    TICKS.on_tick();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_for_typical_clocks() {
        assert_eq!(reload_for(64_000_000), Ok(64_000));
        assert_eq!(reload_for(16_000_000), Ok(16_000));
        assert_eq!(reload_for(1_000), Ok(1));
    }

    #[test]
    fn reload_rejects_zero_frequency() {
        assert_eq!(reload_for(0), Err(NbdError::ZeroClockFrequency));
    }

    #[test]
    fn reload_rejects_sub_khz_clock() {
        assert_eq!(reload_for(999), Err(NbdError::ZeroClockFrequency));
    }

    #[test]
    fn reload_fits_24_bits_for_any_u32_clock() {
        // u32::MAX / 1000 is well below the 24-bit reload limit, so the
        // fastest representable clock still configures cleanly
        let reload = reload_for(u32::MAX).unwrap();
        assert_eq!(reload, u32::MAX / 1_000);
        assert!(reload - 1 <= SYST_MAX_RELOAD);
    }
}
