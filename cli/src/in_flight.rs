use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard},
};

use solana_sdk::pubkey::Pubkey;
use tipjar_core::error::TipjarError;

type InFlightKey = (&'static str, Pubkey);

/// Tracks submissions that have been started but not yet reached a terminal state.
///
/// Only one submission per (operation, address) pair may be in flight from this
/// client. The ledger does its own sequencing, this just keeps a caller from
/// firing the same withdrawal twice while the first is still pending.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    in_flight: Mutex<HashSet<InFlightKey>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<InFlightKey>> {
        // The set stays consistent even if a holder panicked
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_busy(&self, operation: &'static str, address: &Pubkey) -> bool {
        self.lock().contains(&(operation, *address))
    }

    pub fn try_acquire(
        &self,
        operation: &'static str,
        address: Pubkey,
    ) -> Result<InFlightGuard<'_>, TipjarError> {
        if !self.lock().insert((operation, address)) {
            return Err(TipjarError::InFlight { operation, address });
        }

        Ok(InFlightGuard {
            registry: self,
            key: (operation, address),
        })
    }
}

/// Releases the (operation, address) pair when dropped
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlightRegistry,
    key: InFlightKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.key);
    }
}
