//! Pin-ownership registry
//!
//! GPIO pins are the only shared mutable resource crossing module
//! boundaries. Ownership is acquire/release, keyed by pin number and
//! tagged with the owning module id; a module must own a pin exclusively
//! before driving it. There is a single execution context, so this is
//! conflict detection, not locking.

use dln2_protocol::Status;

/// Number of pins the registry tracks
pub const MAX_PINS: usize = 32;

/// Errors from pin acquisition and release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number beyond [`MAX_PINS`]
    InvalidPin,
    /// Pin already owned (by anyone, including the caller)
    InUse,
    /// Pin not owned by the caller
    NotOwned,
}

impl PinError {
    /// Wire status this error resolves to
    pub fn status(self) -> Status {
        match self {
            PinError::InvalidPin => Status::BadParameter,
            PinError::InUse => Status::PinInUse,
            PinError::NotOwned => Status::Fail,
        }
    }
}

/// Tracks which module owns which pin
#[derive(Debug)]
pub struct PinRegistry {
    owners: [Option<u8>; MAX_PINS],
}

impl PinRegistry {
    /// Create a registry with every pin free
    pub const fn new() -> Self {
        Self {
            owners: [None; MAX_PINS],
        }
    }

    /// Claim exclusive ownership of a pin for `owner`.
    ///
    /// Fails when the pin is already owned, also by the same tag —
    /// ownership is exclusive, not recursive.
    pub fn acquire(&mut self, pin: u16, owner: u8) -> Result<(), PinError> {
        let slot = self
            .owners
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin)?;
        if slot.is_some() {
            return Err(PinError::InUse);
        }
        *slot = Some(owner);
        Ok(())
    }

    /// Release a pin previously acquired by `owner`
    pub fn release(&mut self, pin: u16, owner: u8) -> Result<(), PinError> {
        let slot = self
            .owners
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin)?;
        match *slot {
            Some(tag) if tag == owner => {
                *slot = None;
                Ok(())
            }
            _ => Err(PinError::NotOwned),
        }
    }

    /// Current owner of a pin, `None` when free or out of range
    pub fn owner(&self, pin: u16) -> Option<u8> {
        self.owners.get(pin as usize).copied().flatten()
    }
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dln2_protocol::header::module;

    #[test]
    fn test_acquire_and_release() {
        let mut pins = PinRegistry::new();
        pins.acquire(4, module::I2C).unwrap();
        assert_eq!(pins.owner(4), Some(module::I2C));
        pins.release(4, module::I2C).unwrap();
        assert_eq!(pins.owner(4), None);
    }

    #[test]
    fn test_acquire_conflict() {
        let mut pins = PinRegistry::new();
        pins.acquire(4, module::GPIO).unwrap();
        assert_eq!(pins.acquire(4, module::I2C), Err(PinError::InUse));
        // The original owner keeps the pin
        assert_eq!(pins.owner(4), Some(module::GPIO));
    }

    #[test]
    fn test_acquire_not_recursive() {
        let mut pins = PinRegistry::new();
        pins.acquire(4, module::I2C).unwrap();
        assert_eq!(pins.acquire(4, module::I2C), Err(PinError::InUse));
    }

    #[test]
    fn test_release_requires_owner() {
        let mut pins = PinRegistry::new();
        pins.acquire(4, module::GPIO).unwrap();
        assert_eq!(pins.release(4, module::I2C), Err(PinError::NotOwned));
        assert_eq!(pins.release(5, module::I2C), Err(PinError::NotOwned));
    }

    #[test]
    fn test_invalid_pin() {
        let mut pins = PinRegistry::new();
        assert_eq!(
            pins.acquire(MAX_PINS as u16, module::I2C),
            Err(PinError::InvalidPin)
        );
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(PinError::InUse.status(), Status::PinInUse);
        assert_eq!(PinError::InvalidPin.status(), Status::BadParameter);
        assert_eq!(PinError::NotOwned.status(), Status::Fail);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn acquire_then_release_restores_free(
                pin in 0u16..MAX_PINS as u16,
                owner: u8,
            ) {
                let mut pins = PinRegistry::new();
                pins.acquire(pin, owner).unwrap();
                prop_assert_eq!(pins.owner(pin), Some(owner));
                pins.release(pin, owner).unwrap();
                prop_assert_eq!(pins.owner(pin), None);
            }

            #[test]
            fn ownership_is_exclusive(
                pin in 0u16..MAX_PINS as u16,
                owner: u8,
                intruder: u8,
            ) {
                let mut pins = PinRegistry::new();
                pins.acquire(pin, owner).unwrap();
                // Nobody can re-acquire an owned pin, not even its owner
                prop_assert_eq!(pins.acquire(pin, intruder), Err(PinError::InUse));
                prop_assert_eq!(pins.owner(pin), Some(owner));
            }

            #[test]
            fn foreign_release_never_frees(
                pin in 0u16..MAX_PINS as u16,
                owner: u8,
                intruder: u8,
            ) {
                prop_assume!(owner != intruder);
                let mut pins = PinRegistry::new();
                pins.acquire(pin, owner).unwrap();
                prop_assert_eq!(pins.release(pin, intruder), Err(PinError::NotOwned));
                prop_assert_eq!(pins.owner(pin), Some(owner));
            }
        }
    }
}
