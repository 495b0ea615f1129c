//! DLN2 message header encoding and decoding.
//!
//! Header format (8 bytes, all fields little-endian u16):
//! - SIZE: total message size including the header itself
//! - ID: opcode; command byte in bits 0..8, module id in bits 8..16
//! - ECHO: host correlation tag, copied verbatim into the response
//! - HANDLE: host routing handle, copied verbatim into the response

/// Module ids addressed by the opcode's high byte.
///
/// These match the ids the Linux client drivers use
/// (`gpio-dln2`, `spi-dln2`, `i2c-dln2`, `dln2-adc`).
pub mod module {
    /// Generic device-management module
    pub const GENERIC: u8 = 0x00;
    /// GPIO module
    pub const GPIO: u8 = 0x01;
    /// SPI master module
    pub const SPI: u8 = 0x02;
    /// I2C master module
    pub const I2C: u8 = 0x03;
    /// ADC module
    pub const ADC: u8 = 0x06;
}

/// Header size in bytes
pub const HEADER_LEN: usize = 8;

/// Size of the result field that prefixes every response payload
pub const RESULT_LEN: usize = 2;

/// Errors that can occur while encoding or decoding wire messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Buffer ends before the message does
    Truncated,
    /// The header size field disagrees with the delivered byte count
    SizeMismatch,
    /// Destination buffer too small for encoding
    BufferTooSmall,
    /// Payload exceeds the maximum a single message may carry
    PayloadTooLarge,
}

/// A decoded DLN2 message header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    /// Total message size in bytes, header included
    pub size: u16,
    /// Opcode: command byte | module id << 8
    pub id: u16,
    /// Host correlation tag
    pub echo: u16,
    /// Host routing handle
    pub handle: u16,
}

impl Header {
    /// Build an opcode from a command byte and a module id
    pub const fn opcode(command: u8, module: u8) -> u16 {
        command as u16 | (module as u16) << 8
    }

    /// Create a request header for the given opcode and payload length
    pub fn for_request(command: u8, module: u8, echo: u16, payload_len: usize) -> Self {
        Self {
            size: (HEADER_LEN + payload_len) as u16,
            id: Self::opcode(command, module),
            echo,
            handle: 0,
        }
    }

    /// Module id addressed by this message
    pub fn module(&self) -> u8 {
        (self.id >> 8) as u8
    }

    /// Command byte within the addressed module
    pub fn command(&self) -> u8 {
        self.id as u8
    }

    /// Number of payload bytes following the header
    pub fn payload_len(&self) -> usize {
        (self.size as usize).saturating_sub(HEADER_LEN)
    }

    /// Decode a header from the start of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < HEADER_LEN {
            return Err(ProtocolError::Truncated);
        }
        Ok(Self {
            size: u16::from_le_bytes([bytes[0], bytes[1]]),
            id: u16::from_le_bytes([bytes[2], bytes[3]]),
            echo: u16::from_le_bytes([bytes[4], bytes[5]]),
            handle: u16::from_le_bytes([bytes[6], bytes[7]]),
        })
    }

    /// Encode this header into the start of `buffer`
    pub fn encode(&self, buffer: &mut [u8]) -> Result<(), ProtocolError> {
        if buffer.len() < HEADER_LEN {
            return Err(ProtocolError::BufferTooSmall);
        }
        buffer[0..2].copy_from_slice(&self.size.to_le_bytes());
        buffer[2..4].copy_from_slice(&self.id.to_le_bytes());
        buffer[4..6].copy_from_slice(&self.echo.to_le_bytes());
        buffer[6..8].copy_from_slice(&self.handle.to_le_bytes());
        Ok(())
    }
}
