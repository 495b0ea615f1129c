//! Response status codes.
//!
//! The numeric values follow the Diolan DLN result codes the Linux client
//! understands. Every response carries exactly one of these in its 2-byte
//! result field.

/// Result code written into every response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Status {
    /// Command completed
    Success = 0x00,
    /// Generic failure
    Fail = 0x83,
    /// A request field is out of the accepted range
    BadParameter = 0x85,
    /// Request payload size does not match the command
    InvalidCommandSize = 0x86,
    /// Opcode not handled by this device
    CommandNotSupported = 0x91,
    /// I2C slave did not acknowledge its address
    I2cSendingAddressFailed = 0xA2,
    /// I2C transfer moved fewer bytes than requested
    I2cSendingDataFailed = 0xA3,
    /// Pin already owned by another module
    PinInUse = 0xA5,
    /// Port index beyond the configured port count
    InvalidPortNumber = 0xA8,
}

impl Status {
    /// Wire value of this status
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decode a wire value
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x00 => Some(Self::Success),
            0x83 => Some(Self::Fail),
            0x85 => Some(Self::BadParameter),
            0x86 => Some(Self::InvalidCommandSize),
            0x91 => Some(Self::CommandNotSupported),
            0xA2 => Some(Self::I2cSendingAddressFailed),
            0xA3 => Some(Self::I2cSendingDataFailed),
            0xA5 => Some(Self::PinInUse),
            0xA8 => Some(Self::InvalidPortNumber),
            _ => None,
        }
    }

    /// True for `Success`, false for every error code
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}
