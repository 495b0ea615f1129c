//! Blocking delay capability
//!
//! Used by the bus recovery bit-bang loop. Delays are short (a few
//! microseconds) and busy-waiting by design; nothing in the core yields.

/// Blocking microsecond delay
pub trait DelayUs {
    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}
