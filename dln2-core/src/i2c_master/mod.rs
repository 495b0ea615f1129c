//! I2C master module
//!
//! Implements the DLN2 I2C-master command set on top of the capability
//! traits: port enable/disable with pin acquisition, enablement query,
//! buffered read/write with a bounded timeout, and clock recovery for a
//! stuck bus.
//!
//! Every handler validates the payload size first, then the port index,
//! and only then touches hardware; every error resolves locally into a
//! wire status. Port enabled state is owned by the I2C capability and
//! re-queried on every command, never cached here.

pub mod recovery;

use dln2_hal::{DelayUs, Gpio, I2cMaster};
use dln2_protocol::header::module;
use dln2_protocol::i2c::{
    cmd, encode_read_response, PortRequest, TransferRequest, WriteRequest, MAX_TRANSFER,
};
use dln2_protocol::Status;

use crate::config::{I2cMasterConfig, I2cPortConfig};
use crate::dispatch::Module;
use crate::pins::PinRegistry;
use crate::slot::{Slot, SlotError};
use self::recovery::{recover_bus, RecoveryOutcome};

/// Per-transfer timeout. The Linux client gives up after 200 ms; finishing
/// inside 150 ms keeps the response ahead of the host's deadline.
pub const I2C_TIMEOUT_MS: u32 = 150;

/// The I2C-master module: configuration plus injected capabilities.
///
/// Constructed once at boot and handed to the dispatcher; holds no
/// mutable state of its own.
pub struct I2cMasterModule<'a, B, G, D> {
    config: &'a I2cMasterConfig,
    bus: &'a mut B,
    gpio: &'a mut G,
    delay: &'a mut D,
    pins: &'a mut PinRegistry,
}

impl<'a, B, G, D> I2cMasterModule<'a, B, G, D>
where
    B: I2cMaster,
    G: Gpio,
    D: DelayUs,
{
    pub fn new(
        config: &'a I2cMasterConfig,
        bus: &'a mut B,
        gpio: &'a mut G,
        delay: &'a mut D,
        pins: &'a mut PinRegistry,
    ) -> Self {
        Self {
            config,
            bus,
            gpio,
            delay,
            pins,
        }
    }

    /// Decode a port-only request and validate the index.
    ///
    /// On a validation failure the slot is answered and `Ok(None)` comes
    /// back; the caller just returns.
    fn checked_port(
        &self,
        slot: &mut Slot<'_>,
    ) -> Result<Option<(u8, &'a I2cPortConfig)>, SlotError> {
        let req = match PortRequest::decode(slot.request()) {
            Ok(req) => req,
            Err(_) => {
                slot.respond_error(Status::InvalidCommandSize)?;
                return Ok(None);
            }
        };
        match self.config.port(req.port) {
            Some(cfg) => Ok(Some((req.port, cfg))),
            None => {
                slot.respond_error(Status::InvalidPortNumber)?;
                Ok(None)
            }
        }
    }

    fn enable(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        let Some((port, cfg)) = self.checked_port(slot)? else {
            return Ok(());
        };

        if self.bus.is_enabled(port) {
            // Host retries must not leak pins: already enabled is success
            return slot.respond_empty(Status::Success);
        }

        if let Err(err) = self.pins.acquire(cfg.scl_pin, module::I2C) {
            return slot.respond_error(err.status());
        }
        if let Err(err) = self.pins.acquire(cfg.sda_pin, module::I2C) {
            // We hold SCL, so the rollback release cannot fail
            let _ = self.pins.release(cfg.scl_pin, module::I2C);
            return slot.respond_error(err.status());
        }

        if self.bus.init(port, cfg.sda_pin, cfg.scl_pin).is_err() {
            let _ = self.pins.release(cfg.sda_pin, module::I2C);
            let _ = self.pins.release(cfg.scl_pin, module::I2C);
            return slot.respond_error(Status::Fail);
        }

        slot.respond_empty(Status::Success)
    }

    fn disable(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        let Some((port, cfg)) = self.checked_port(slot)? else {
            return Ok(());
        };

        if !self.bus.is_enabled(port) {
            // Disabling a disabled port would double-release its pins
            return slot.respond_error(Status::Fail);
        }

        if let Err(err) = self.pins.release(cfg.sda_pin, module::I2C) {
            return slot.respond_error(err.status());
        }
        if let Err(err) = self.pins.release(cfg.scl_pin, module::I2C) {
            return slot.respond_error(err.status());
        }

        if self.bus.deinit(port).is_err() {
            return slot.respond_error(Status::Fail);
        }

        slot.respond_empty(Status::Success)
    }

    fn is_enabled(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        let Some((port, _)) = self.checked_port(slot)? else {
            return Ok(());
        };
        slot.respond_u8(self.bus.is_enabled(port) as u8)
    }

    fn read(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        let req = match TransferRequest::decode_read(slot.request()) {
            Ok(req) => req,
            Err(_) => return slot.respond_error(Status::InvalidCommandSize),
        };
        if self.config.port(req.port).is_none() {
            return slot.respond_error(Status::InvalidPortNumber);
        }
        let len = req.buf_len as usize;
        if len > MAX_TRANSFER {
            return slot.respond_error(Status::BadParameter);
        }

        let mut data = [0u8; MAX_TRANSFER];
        match self.bus.read(
            req.port,
            req.addr,
            req.mem_addr_len,
            req.mem_addr,
            &mut data[..len],
            I2C_TIMEOUT_MS,
        ) {
            Err(_) => slot.respond_error(Status::I2cSendingAddressFailed),
            // The protocol has no short-read code; the closest is this one
            Ok(n) if n != len => slot.respond_error(Status::I2cSendingDataFailed),
            Ok(_) => {
                let mut payload = [0u8; 2 + MAX_TRANSFER];
                let total = encode_read_response(&data[..len], &mut payload)
                    .map_err(|_| SlotError::ResponseTooLarge)?;
                slot.respond_with(&payload[..total])
            }
        }
    }

    fn write(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        let req = match WriteRequest::decode(slot.request()) {
            Ok(req) => req,
            Err(_) => return slot.respond_error(Status::InvalidCommandSize),
        };
        if self.config.port(req.xfer.port).is_none() {
            return slot.respond_error(Status::InvalidPortNumber);
        }
        if req.data.len() > MAX_TRANSFER {
            return slot.respond_error(Status::BadParameter);
        }

        match self.bus.write(
            req.xfer.port,
            req.xfer.addr,
            req.xfer.mem_addr_len,
            req.xfer.mem_addr,
            req.data,
            I2C_TIMEOUT_MS,
        ) {
            Err(_) => slot.respond_error(Status::I2cSendingAddressFailed),
            Ok(n) if n != req.data.len() => slot.respond_error(Status::I2cSendingDataFailed),
            Ok(n) => {
                // The host ignores the payload but sizes its buffer by the
                // byte count written; answer with that many zero bytes
                let zeros = [0u8; MAX_TRANSFER];
                slot.respond_with(&zeros[..n])
            }
        }
    }

    fn initiate_recovery(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        let Some((_, cfg)) = self.checked_port(slot)? else {
            return Ok(());
        };

        match recover_bus(self.gpio, self.delay, cfg.sda_pin, cfg.scl_pin) {
            RecoveryOutcome::Recovered { .. } => slot.respond_empty(Status::Success),
            RecoveryOutcome::Failed => slot.respond_error(Status::Fail),
        }
    }
}

impl<B, G, D> Module for I2cMasterModule<'_, B, G, D>
where
    B: I2cMaster,
    G: Gpio,
    D: DelayUs,
{
    fn id(&self) -> u8 {
        module::I2C
    }

    fn handle(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError> {
        match slot.header().command() {
            cmd::GET_PORT_COUNT => slot.respond_u8(self.config.port_count()),
            cmd::ENABLE => self.enable(slot),
            cmd::DISABLE => self.disable(slot),
            cmd::IS_ENABLED => self.is_enabled(slot),
            cmd::WRITE => self.write(slot),
            cmd::READ => self.read(slot),
            cmd::INITIATE_RECOVERY => self.initiate_recovery(slot),
            // Not implemented; a definite answer beats a hung host request
            cmd::SET_FREQUENCY
            | cmd::GET_FREQUENCY
            | cmd::SCAN_DEVICES
            | cmd::PULLUP_ENABLE
            | cmd::PULLUP_DISABLE
            | cmd::PULLUP_IS_ENABLED => slot.respond_error(Status::CommandNotSupported),
            _ => slot.respond_error(Status::CommandNotSupported),
        }
    }
}
