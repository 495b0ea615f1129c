//! Command dispatcher and module registry
//!
//! The registry maps module ids to handlers. It is built once at startup
//! and immutable afterwards; there is no runtime registration. Dispatch
//! guarantees that every slot handed in comes back answered exactly once,
//! whatever the handler does.

use dln2_protocol::Status;
use heapless::Vec;

use crate::slot::{Slot, SlotError};

/// Maximum registered modules (generic, GPIO, SPI, I2C, ADC + spare)
pub const MAX_MODULES: usize = 6;

/// Errors from registry construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room for another module
    Full,
    /// A module with this id is already registered
    Duplicate,
}

/// A dispatch target for one module id
///
/// Handlers answer the slot through its response API. Returning without
/// answering (or returning an error) makes the dispatcher answer
/// [`Status::Fail`] on the handler's behalf, so a slot can never go back
/// to the transport unanswered.
pub trait Module {
    /// Module id this handler serves
    fn id(&self) -> u8;

    /// Handle one request
    fn handle(&mut self, slot: &mut Slot<'_>) -> Result<(), SlotError>;
}

/// Routes slots to registered module handlers
pub struct Dispatcher<'a> {
    modules: Vec<&'a mut dyn Module, MAX_MODULES>,
}

impl<'a> Dispatcher<'a> {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module handler; ids must be unique
    pub fn register(&mut self, module: &'a mut dyn Module) -> Result<(), RegistryError> {
        if self.modules.iter().any(|m| m.id() == module.id()) {
            return Err(RegistryError::Duplicate);
        }
        self.modules
            .push(module)
            .map_err(|_| RegistryError::Full)?;
        Ok(())
    }

    /// Dispatch one slot to the module its header addresses.
    ///
    /// The slot is answered on every path: unknown module ids get
    /// [`Status::CommandNotSupported`], and a handler that fails to answer
    /// gets backstopped with [`Status::Fail`].
    pub fn dispatch(&mut self, slot: &mut Slot<'_>) {
        slot.mark_dispatched();
        let module_id = slot.header().module();

        let Some(handler) = self.modules.iter_mut().find(|m| m.id() == module_id) else {
            slot.force_answer(Status::CommandNotSupported);
            return;
        };

        match handler.handle(slot) {
            Ok(()) if slot.is_answered() => {}
            _ => slot.force_answer(Status::Fail),
        }
    }
}

impl Default for Dispatcher<'_> {
    fn default() -> Self {
        Self::new()
    }
}
