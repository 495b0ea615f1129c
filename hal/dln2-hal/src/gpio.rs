//! GPIO capability
//!
//! Pins are addressed by number, matching how the host names them on the
//! wire. Ownership arbitration is not done here; the core's pin registry
//! decides who may touch a pin before this capability is ever called.

/// Digital I/O, addressed by pin number
///
/// Implementations handle the actual hardware register manipulation for
/// the specific chip.
pub trait Gpio {
    /// Initialise a pin as a plain software-controlled I/O.
    ///
    /// Clears the output enable (input) and any driven level.
    fn init(&mut self, pin: u16);

    /// Reset a pin back to its disabled/default function
    fn deinit(&mut self, pin: u16);

    /// Set the pin direction; `output = false` releases the line to its
    /// external pull
    fn set_dir(&mut self, pin: u16, output: bool);

    /// Read the current level of the pin
    fn get(&self, pin: u16) -> bool;

    /// Drive the pin to the given level (output direction only)
    fn put(&mut self, pin: u16, level: bool);
}
