//! Fake capability implementations for host tests

use dln2_hal::{DelayUs, Gpio, I2cError, I2cMaster};
use heapless::Vec;

/// One recorded GPIO capability call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioOp {
    Init(u16),
    Deinit(u16),
    SetDir(u16, bool),
    Put(u16, bool),
}

/// Scripted GPIO fake.
///
/// Records every call. When configured as a stuck bus, the SDA pin reads
/// low until `release_after` falling edges have been driven on SCL.
pub struct MockGpio {
    pub ops: Vec<GpioOp, 256>,
    sda_pin: Option<u16>,
    release_after: Option<u32>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            sda_pin: None,
            release_after: None,
        }
    }

    /// A bus whose slave releases SDA after `release_after` clock pulses
    /// (`None`: never releases)
    pub fn stuck_bus(sda: u16, _scl: u16, release_after: Option<u32>) -> Self {
        Self {
            ops: Vec::new(),
            sda_pin: Some(sda),
            release_after,
        }
    }

    /// Falling edges driven on `pin` so far
    pub fn falling_edges(&self, pin: u16) -> u32 {
        self.ops
            .iter()
            .filter(|op| **op == GpioOp::Put(pin, false))
            .count() as u32
    }
}

impl Gpio for MockGpio {
    fn init(&mut self, pin: u16) {
        let _ = self.ops.push(GpioOp::Init(pin));
    }

    fn deinit(&mut self, pin: u16) {
        let _ = self.ops.push(GpioOp::Deinit(pin));
    }

    fn set_dir(&mut self, pin: u16, output: bool) {
        let _ = self.ops.push(GpioOp::SetDir(pin, output));
    }

    fn get(&self, pin: u16) -> bool {
        if Some(pin) == self.sda_pin {
            // Clock pulses show up as falling edges on some other pin
            let pulses = self
                .ops
                .iter()
                .filter(|op| matches!(op, GpioOp::Put(p, false) if Some(*p) != self.sda_pin))
                .count() as u32;
            match self.release_after {
                Some(k) => pulses >= k,
                None => false,
            }
        } else {
            false
        }
    }

    fn put(&mut self, pin: u16, level: bool) {
        let _ = self.ops.push(GpioOp::Put(pin, level));
    }
}

/// Scripted I2C master fake
pub struct MockI2c {
    pub enabled: [bool; 4],
    pub init_calls: Vec<(u8, u16, u16), 8>,
    pub deinit_calls: Vec<u8, 8>,
    pub read_calls: u32,
    pub write_calls: u32,
    pub last_addr: u8,
    pub last_mem_addr_len: u8,
    pub last_mem_addr: u32,
    pub last_timeout_ms: u32,
    pub last_write: Vec<u8, 64>,
    /// Fail `init` with a bus error
    pub fail_init: bool,
    /// Fail read/write transfers with this error
    pub transfer_error: Option<I2cError>,
    /// Complete transfers with this count instead of the full length
    pub short_count: Option<usize>,
    /// First byte of the pattern reads fill buffers with
    pub read_fill: u8,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            enabled: [false; 4],
            init_calls: Vec::new(),
            deinit_calls: Vec::new(),
            read_calls: 0,
            write_calls: 0,
            last_addr: 0,
            last_mem_addr_len: 0,
            last_mem_addr: 0,
            last_timeout_ms: 0,
            last_write: Vec::new(),
            fail_init: false,
            transfer_error: None,
            short_count: None,
            read_fill: 0xA0,
        }
    }
}

impl I2cMaster for MockI2c {
    fn init(&mut self, port: u8, sda: u16, scl: u16) -> Result<(), I2cError> {
        let _ = self.init_calls.push((port, sda, scl));
        if self.fail_init {
            return Err(I2cError::Bus);
        }
        self.enabled[port as usize] = true;
        Ok(())
    }

    fn deinit(&mut self, port: u8) -> Result<(), I2cError> {
        let _ = self.deinit_calls.push(port);
        self.enabled[port as usize] = false;
        Ok(())
    }

    fn is_enabled(&self, port: u8) -> bool {
        self.enabled.get(port as usize).copied().unwrap_or(false)
    }

    fn read(
        &mut self,
        _port: u8,
        addr: u8,
        mem_addr_len: u8,
        mem_addr: u32,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<usize, I2cError> {
        self.read_calls += 1;
        self.last_addr = addr;
        self.last_mem_addr_len = mem_addr_len;
        self.last_mem_addr = mem_addr;
        self.last_timeout_ms = timeout_ms;
        if let Some(err) = self.transfer_error {
            return Err(err);
        }
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_fill.wrapping_add(i as u8);
        }
        Ok(self.short_count.unwrap_or(buf.len()))
    }

    fn write(
        &mut self,
        _port: u8,
        addr: u8,
        mem_addr_len: u8,
        mem_addr: u32,
        data: &[u8],
        timeout_ms: u32,
    ) -> Result<usize, I2cError> {
        self.write_calls += 1;
        self.last_addr = addr;
        self.last_mem_addr_len = mem_addr_len;
        self.last_mem_addr = mem_addr;
        self.last_timeout_ms = timeout_ms;
        if let Some(err) = self.transfer_error {
            return Err(err);
        }
        self.last_write.clear();
        let _ = self.last_write.extend_from_slice(data);
        Ok(self.short_count.unwrap_or(data.len()))
    }
}

/// Counting delay fake
pub struct MockDelay {
    pub calls: u32,
    pub total_us: u32,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            calls: 0,
            total_us: 0,
        }
    }
}

impl DelayUs for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.calls += 1;
        self.total_us += us;
    }
}
