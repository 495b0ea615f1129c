//! SPI master capability
//!
//! Contract only: the SPI module handlers live outside this core, but the
//! capability is defined here so every subsystem is injected the same way.

/// SPI bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// SPI mode (0-3: clock polarity/phase)
    pub mode: u8,
    /// Bits per word
    pub bits_per_word: u8,
    /// MISO pin number
    pub miso_pin: u16,
    /// MOSI pin number
    pub mosi_pin: u16,
    /// SCK pin number
    pub sck_pin: u16,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000,
            mode: 0,
            bits_per_word: 8,
            miso_pin: 0,
            mosi_pin: 0,
            sck_pin: 0,
        }
    }
}

/// Errors an SPI operation can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Configuration not supported by the peripheral
    InvalidConfig,
    /// Port is not initialised
    InvalidState,
    /// Controller fault
    Bus,
}

/// SPI master bus operations
pub trait SpiMaster {
    /// Bring up the given port with the given configuration
    fn init(&mut self, port: u8, config: &SpiConfig) -> Result<(), SpiError>;

    /// Shut the given port down
    fn deinit(&mut self, port: u8) -> Result<(), SpiError>;

    /// Whether the port is currently initialised
    fn is_enabled(&self, port: u8) -> bool;

    /// Full-duplex transfer; `rx` is filled while `tx` is shifted out
    fn transfer(&mut self, port: u8, tx: &[u8], rx: &mut [u8]) -> Result<(), SpiError>;
}
