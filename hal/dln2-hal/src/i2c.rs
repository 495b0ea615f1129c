//! I2C master capability
//!
//! One implementation manages all logical ports of the chip. Ports are
//! independent of each other; concurrent use of the same port from two
//! callers is undefined (the core runs single-threaded).

/// Errors an I2C transfer can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Slave did not acknowledge its address
    AddressNack,
    /// Slave stopped acknowledging mid-transfer
    DataNack,
    /// Lost arbitration against another master
    ArbitrationLost,
    /// Transfer did not complete within the timeout
    Timeout,
    /// Bus or controller fault (stuck line, peripheral error)
    Bus,
    /// Port is not initialised or the arguments are unusable
    InvalidState,
}

/// I2C master bus operations
pub trait I2cMaster {
    /// Bring up the given port on the given SDA/SCL pins
    fn init(&mut self, port: u8, sda: u16, scl: u16) -> Result<(), I2cError>;

    /// Shut the given port down and release its pins from the peripheral
    fn deinit(&mut self, port: u8) -> Result<(), I2cError>;

    /// Whether the port is currently initialised.
    ///
    /// This is the single source of truth for port state; callers must not
    /// cache the answer.
    fn is_enabled(&self, port: u8) -> bool;

    /// Read from a slave device.
    ///
    /// When `mem_addr_len` is non-zero, the low `mem_addr_len` bytes of
    /// `mem_addr` are written first to select a register, followed by a
    /// repeated start. Fills `buf` and returns the number of bytes actually
    /// read, which may be short of `buf.len()`.
    fn read(
        &mut self,
        port: u8,
        addr: u8,
        mem_addr_len: u8,
        mem_addr: u32,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<usize, I2cError>;

    /// Write to a slave device.
    ///
    /// Register addressing as for [`read`](Self::read). Returns the number
    /// of bytes actually written, which may be short of `data.len()`.
    fn write(
        &mut self,
        port: u8,
        addr: u8,
        mem_addr_len: u8,
        mem_addr: u32,
        data: &[u8],
        timeout_ms: u32,
    ) -> Result<usize, I2cError>;
}
