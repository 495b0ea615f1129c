//! DLN2 Hardware Capability Layer
//!
//! This crate defines the hardware capability traits the protocol core
//! depends on. Chip-specific crates (RP2040, ESP32, etc.) implement them
//! against real registers; host tests implement them with fakes. The core
//! never touches a concrete hardware type.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dln2-core (dispatcher, I2C module)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dln2-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  test mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::Gpio`] - Digital I/O addressed by pin number
//! - [`i2c::I2cMaster`] - I2C master bus operations
//! - [`spi::SpiMaster`] - SPI master bus bring-up
//! - [`adc::Adc`] - ADC conversions
//! - [`delay::DelayUs`] - Blocking microsecond delays

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use adc::Adc;
pub use delay::DelayUs;
pub use gpio::Gpio;
pub use i2c::{I2cError, I2cMaster};
pub use spi::SpiMaster;
