//! Board-agnostic core of the DLN2 adapter firmware
//!
//! This crate contains everything between the USB transport and the
//! hardware capabilities:
//!
//! - Slot: one in-flight request/response exchange
//! - Command dispatcher and module registry
//! - Pin-ownership registry (conflict detection across modules)
//! - I2C master module, including bus recovery
//! - Static device configuration types
//!
//! The transport hands a framed request to the dispatcher inside a
//! [`slot::Slot`]; the dispatcher routes it to the module addressed by the
//! header and guarantees the slot comes back answered exactly once. All
//! hardware access goes through the `dln2-hal` capability traits, so the
//! whole crate runs under host tests with fakes.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod i2c_master;
pub mod pins;
pub mod slot;

#[cfg(test)]
pub(crate) mod mock;

pub use dispatch::{Dispatcher, Module};
pub use slot::Slot;
