//! I2C-master message codecs.
//!
//! Request shapes used by the Linux `i2c-dln2` client:
//! - port-only commands carry a single port byte;
//! - read carries 9 fixed bytes (port, addr, mem-addr descriptor, length);
//! - write carries the same 9 fixed bytes followed by the data inline.
//!
//! A successful read answers with a u16 length prefix followed by the data.

use crate::header::ProtocolError;

/// I2C-master command bytes
pub mod cmd {
    pub const GET_PORT_COUNT: u8 = 0x00;
    pub const ENABLE: u8 = 0x01;
    pub const DISABLE: u8 = 0x02;
    pub const IS_ENABLED: u8 = 0x03;
    pub const SET_FREQUENCY: u8 = 0x04;
    pub const GET_FREQUENCY: u8 = 0x05;
    pub const WRITE: u8 = 0x06;
    pub const READ: u8 = 0x07;
    pub const SCAN_DEVICES: u8 = 0x08;
    pub const PULLUP_ENABLE: u8 = 0x09;
    pub const PULLUP_DISABLE: u8 = 0x0A;
    pub const PULLUP_IS_ENABLED: u8 = 0x0B;
    /// Vendor extension: clock out a stuck bus (not part of the Diolan set)
    pub const INITIATE_RECOVERY: u8 = 0x10;
}

/// Largest data transfer a single read or write may carry
pub const MAX_TRANSFER: usize = 256;

/// Request addressing a single port (enable, disable, is-enabled, recovery)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortRequest {
    pub port: u8,
}

impl PortRequest {
    /// Encoded size in bytes
    pub const LEN: usize = 1;

    /// Decode from a request payload; the size must match exactly
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() != Self::LEN {
            return Err(ProtocolError::SizeMismatch);
        }
        Ok(Self { port: bytes[0] })
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if buffer.len() < Self::LEN {
            return Err(ProtocolError::BufferTooSmall);
        }
        buffer[0] = self.port;
        Ok(Self::LEN)
    }
}

/// Fixed fields shared by the read and write requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferRequest {
    /// Port index
    pub port: u8,
    /// 7-bit slave address
    pub addr: u8,
    /// Number of significant memory-address bytes (0 for plain transfers)
    pub mem_addr_len: u8,
    /// Memory (register) address within the slave
    pub mem_addr: u32,
    /// Number of data bytes to transfer
    pub buf_len: u16,
}

impl TransferRequest {
    /// Encoded size of the fixed fields in bytes
    pub const LEN: usize = 9;

    fn decode_fixed(bytes: &[u8]) -> Self {
        Self {
            port: bytes[0],
            addr: bytes[1],
            mem_addr_len: bytes[2],
            mem_addr: u32::from_le_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]),
            buf_len: u16::from_le_bytes([bytes[7], bytes[8]]),
        }
    }

    fn encode_fixed(&self, buffer: &mut [u8]) {
        buffer[0] = self.port;
        buffer[1] = self.addr;
        buffer[2] = self.mem_addr_len;
        buffer[3..7].copy_from_slice(&self.mem_addr.to_le_bytes());
        buffer[7..9].copy_from_slice(&self.buf_len.to_le_bytes());
    }

    /// Decode a read request; the payload must be exactly the fixed fields
    pub fn decode_read(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() != Self::LEN {
            return Err(ProtocolError::SizeMismatch);
        }
        Ok(Self::decode_fixed(bytes))
    }

    /// Encode a read request
    pub fn encode_read(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if buffer.len() < Self::LEN {
            return Err(ProtocolError::BufferTooSmall);
        }
        self.encode_fixed(buffer);
        Ok(Self::LEN)
    }
}

/// Write request: fixed transfer fields plus the data to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteRequest<'a> {
    pub xfer: TransferRequest,
    pub data: &'a [u8],
}

impl<'a> WriteRequest<'a> {
    /// Decode a write request.
    ///
    /// The payload must hold the fixed fields plus at least `buf_len` data
    /// bytes; the data slice is borrowed from `bytes`, truncated to
    /// `buf_len`.
    pub fn decode(bytes: &'a [u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < TransferRequest::LEN {
            return Err(ProtocolError::SizeMismatch);
        }
        let xfer = TransferRequest::decode_fixed(bytes);
        let data = &bytes[TransferRequest::LEN..];
        if data.len() < xfer.buf_len as usize {
            return Err(ProtocolError::SizeMismatch);
        }
        Ok(Self {
            xfer,
            data: &data[..xfer.buf_len as usize],
        })
    }

    /// Encode a write request, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ProtocolError> {
        if self.data.len() > MAX_TRANSFER {
            return Err(ProtocolError::PayloadTooLarge);
        }
        let total = TransferRequest::LEN + self.data.len();
        if buffer.len() < total {
            return Err(ProtocolError::BufferTooSmall);
        }
        self.xfer.encode_fixed(buffer);
        buffer[TransferRequest::LEN..total].copy_from_slice(self.data);
        Ok(total)
    }
}

/// Encode a read response payload: u16 length prefix followed by the data.
///
/// Returns the number of bytes written.
pub fn encode_read_response(data: &[u8], buffer: &mut [u8]) -> Result<usize, ProtocolError> {
    if data.len() > MAX_TRANSFER {
        return Err(ProtocolError::PayloadTooLarge);
    }
    let total = 2 + data.len();
    if buffer.len() < total {
        return Err(ProtocolError::BufferTooSmall);
    }
    buffer[0..2].copy_from_slice(&(data.len() as u16).to_le_bytes());
    buffer[2..total].copy_from_slice(data);
    Ok(total)
}
