//! I2C bus clock recovery
//!
//! A slave interrupted mid-transaction (protocol violation, power glitch)
//! can hold SDA low forever, wedging the bus. The master can free it by
//! clocking SCL until the slave finishes the byte it believes it is
//! sending and releases the line. The loop is bounded: at most
//! [`MAX_PULSES`] clock pulses are ever issued.
//!
//! This is best-effort clock recovery only: no STOP condition is issued
//! afterwards, so callers needing full bus-recovery semantics must follow
//! up themselves.

use dln2_hal::{DelayUs, Gpio};

/// Upper bound on clock pulses per recovery attempt
pub const MAX_PULSES: u8 = 16;

/// Half-period of the recovery clock in microseconds
pub const HALF_PERIOD_US: u32 = 2;

/// Result of one recovery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryOutcome {
    /// SDA released; `pulses` clock pulses were needed (1-based)
    Recovered { pulses: u8 },
    /// SDA still low after [`MAX_PULSES`] pulses; both pins deinitialised
    Failed,
}

impl RecoveryOutcome {
    /// Whether the bus was freed
    pub fn is_recovered(&self) -> bool {
        matches!(self, RecoveryOutcome::Recovered { .. })
    }
}

/// Clock a stuck bus until the slave releases SDA.
///
/// SDA is configured as an input (released to its external pull-up), SCL
/// as an output, then up to [`MAX_PULSES`] pulses are driven, sampling SDA
/// after each low phase and exiting early the moment it reads high. On
/// success the pins are left configured for the caller to re-initialise
/// the bus; on failure both are deinitialised.
pub fn recover_bus<G, D>(gpio: &mut G, delay: &mut D, sda: u16, scl: u16) -> RecoveryOutcome
where
    G: Gpio,
    D: DelayUs,
{
    gpio.init(sda);
    gpio.set_dir(sda, false);

    gpio.init(scl);
    gpio.set_dir(scl, true);

    for pulse in 1..=MAX_PULSES {
        gpio.put(scl, true);
        delay.delay_us(HALF_PERIOD_US);
        gpio.put(scl, false);
        delay.delay_us(HALF_PERIOD_US);

        if gpio.get(sda) {
            return RecoveryOutcome::Recovered { pulses: pulse };
        }
    }

    gpio.deinit(scl);
    gpio.deinit(sda);
    RecoveryOutcome::Failed
}
