//! DLN2 wire protocol
//!
//! This crate defines the byte-level protocol spoken between the Linux dln2
//! MFD client and the device over a vendor-specific USB bulk interface.
//! The framing is fixed by the existing kernel driver, so every field here
//! is encoded explicitly, little-endian, field by field — never by punning
//! a packed struct over the buffer.
//!
//! # Message layout
//!
//! ```text
//! Request:              Response:
//! ┌────────┬─────────┐  ┌────────┬────────┬─────────┐
//! │ HEADER │ PAYLOAD │  │ HEADER │ RESULT │ PAYLOAD │
//! │ 8B     │ 0–N B   │  │ 8B     │ 2B     │ 0–N B   │
//! └────────┴─────────┘  └────────┴────────┴─────────┘
//! ```
//!
//! The header carries the total size, the opcode (command byte plus module
//! byte), and two host correlation fields (`echo`, `handle`) that the
//! device copies back verbatim. The opcode's module byte selects the
//! subsystem (GPIO, SPI, I2C master, ADC); the command byte selects the
//! operation within it.

#![no_std]
#![deny(unsafe_code)]

pub mod header;
pub mod i2c;
pub mod status;

pub use header::{Header, ProtocolError, HEADER_LEN, RESULT_LEN};
pub use status::Status;
