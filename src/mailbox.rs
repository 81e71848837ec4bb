//! Effect hand-off between execution contexts.
//!
//! A single-slot mailbox built on `critical-section`. Control code (a BLE
//! handler, a button task) posts a fully constructed effect; the render
//! loop takes it between ticks. A newer post replaces an effect that has
//! not been picked up yet.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::error::Result;
use crate::scheduler::{ActiveEffect, effect_name};

/// Thread and interrupt safe effect slot
pub struct EffectMailbox<E> {
    slot: Mutex<RefCell<Option<ActiveEffect<E>>>>,
}

impl<E> EffectMailbox<E> {
    /// Create an empty mailbox.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Post an effect, replacing any effect still waiting.
    ///
    /// Returns `true` if a pending effect was replaced.
    pub fn post(&self, name: &str, effect: E) -> Result<bool> {
        let active = ActiveEffect {
            name: effect_name(name)?,
            effect,
        };
        let replaced = critical_section::with(|cs| self.slot.borrow(cs).replace(Some(active)));
        Ok(replaced.is_some())
    }

    /// Take the pending effect, if any
    pub fn take(&self) -> Option<ActiveEffect<E>> {
        critical_section::with(|cs| self.slot.borrow(cs).take())
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).borrow().is_some())
    }
}

impl<E> Default for EffectMailbox<E> {
    fn default() -> Self {
        Self::new()
    }
}
