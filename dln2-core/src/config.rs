//! Static device configuration types
//!
//! Built once at boot from the board definition and treated as read-only
//! for the life of the firmware. Runtime state (which ports are enabled)
//! lives in the capabilities, never here.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a port label
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum I2C master ports per device
pub const MAX_I2C_PORTS: usize = 2;

/// Configuration for one logical I2C master port
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cPortConfig {
    /// Port label (e.g. "i2c0")
    pub name: String<MAX_LABEL_LEN>,
    /// Own address of the controller on the bus
    pub address: u16,
    /// Bus frequency in Hz
    pub frequency: u32,
    /// SDA pin number
    pub sda_pin: u16,
    /// SCL pin number
    pub scl_pin: u16,
}

impl I2cPortConfig {
    /// Create a port config; the name is truncated to [`MAX_LABEL_LEN`]
    pub fn new(name: &str, sda_pin: u16, scl_pin: u16) -> Self {
        let mut label = String::new();
        for c in name.chars().take(MAX_LABEL_LEN) {
            let _ = label.push(c);
        }
        Self {
            name: label,
            address: 0,
            frequency: 100_000,
            sda_pin,
            scl_pin,
        }
    }
}

/// I2C master device configuration: the ordered set of logical ports
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cMasterConfig {
    /// Per-port configuration, indexed by port number
    pub ports: Vec<I2cPortConfig, MAX_I2C_PORTS>,
}

impl I2cMasterConfig {
    /// Number of configured ports
    pub fn port_count(&self) -> u8 {
        self.ports.len() as u8
    }

    /// Look up a port's configuration, `None` when out of range
    pub fn port(&self, port: u8) -> Option<&I2cPortConfig> {
        self.ports.get(port as usize)
    }
}
