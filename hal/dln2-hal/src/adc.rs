//! ADC capability
//!
//! Contract only: the ADC module handlers live outside this core.

/// Errors an ADC conversion can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel not wired on this board
    InvalidChannel,
    /// Converter not initialised
    InvalidState,
    /// Conversion failed or timed out
    Conversion,
}

/// ADC conversions
pub trait Adc {
    /// Bring up the converter
    fn init(&mut self) -> Result<(), AdcError>;

    /// Shut the converter down
    fn deinit(&mut self);

    /// Route the given pin to the converter
    fn init_pin(&mut self, pin: u16);

    /// Run one conversion on the given channel, returning the raw sample
    fn read(&mut self, channel: u16) -> Result<u16, AdcError>;
}
