//! Per-encounter re-entrancy locks.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use xp_core::EncounterId;

/// Set of encounters with an award cycle in flight.
///
/// A second trigger for an encounter that is already being processed is
/// dropped rather than queued. The set is only held for the insert/remove, so
/// it is never held across an await point.
#[derive(Debug, Default)]
pub struct ProcessingLocks {
    in_flight: Mutex<HashSet<EncounterId>>,
}

impl ProcessingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the encounter, or returns `None` if it is already claimed.
    pub fn try_acquire(&self, encounter: &EncounterId) -> Option<ProcessingGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.insert(encounter.clone()).then(|| ProcessingGuard {
            locks: self,
            encounter: encounter.clone(),
        })
    }

    pub fn is_held(&self, encounter: &EncounterId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(encounter)
    }

    fn release(&self, encounter: &EncounterId) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(encounter);
    }
}

/// Claim on one encounter, released on drop.
#[derive(Debug)]
pub struct ProcessingGuard<'a> {
    locks: &'a ProcessingLocks,
    encounter: EncounterId,
}

impl ProcessingGuard<'_> {
    pub fn encounter(&self) -> &EncounterId {
        &self.encounter
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.locks.release(&self.encounter);
    }
}
