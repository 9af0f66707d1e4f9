//! In-memory encounter repository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use xp_core::{Combatant, CombatantId, Encounter, EncounterFlags, EncounterId, EncounterState};

use crate::repository::{EncounterFlag, EncounterRepository, RepositoryError, Result};

/// In-memory encounter store for testing and development.
///
/// Thread-safe but not persistent across process restarts. Besides the
/// repository contract it exposes the mutations the host would perform
/// itself (ending combat, removing combatants, deleting encounters) so tests
/// and the replay CLI can stage host behavior.
pub struct InMemoryEncounterRepository {
    encounters: RwLock<HashMap<EncounterId, Encounter>>,
}

impl InMemoryEncounterRepository {
    /// Create a new empty in-memory encounter repository.
    pub fn new() -> Self {
        Self {
            encounters: RwLock::new(HashMap::new()),
        }
    }

    /// Create a repository pre-loaded with encounters.
    pub fn with_encounters(encounters: impl IntoIterator<Item = Encounter>) -> Self {
        Self {
            encounters: RwLock::new(encounters.into_iter().map(|e| (e.id.clone(), e)).collect()),
        }
    }

    /// Insert or replace an encounter.
    pub fn insert(&self, encounter: Encounter) -> Result<()> {
        let mut encounters = self
            .encounters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        encounters.insert(encounter.id.clone(), encounter);
        Ok(())
    }

    /// Snapshot of a stored encounter.
    pub fn get(&self, id: &EncounterId) -> Result<Option<Encounter>> {
        let encounters = self
            .encounters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(encounters.get(id).cloned())
    }

    /// Mark an encounter as ended.
    pub fn end(&self, id: &EncounterId) -> Result<()> {
        self.with_encounter(id, |encounter| {
            encounter.state = EncounterState::Ended;
        })
    }

    /// Remove a combatant and return it, as the host does before firing its
    /// deletion event.
    pub fn remove_combatant(
        &self,
        id: &EncounterId,
        combatant: &CombatantId,
    ) -> Result<Option<Combatant>> {
        self.with_encounter(id, |encounter| encounter.remove_combatant(combatant))
    }

    /// Delete an encounter entirely.
    pub fn delete(&self, id: &EncounterId) -> Result<Option<Encounter>> {
        let mut encounters = self
            .encounters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(encounters.remove(id))
    }

    fn with_encounter<T>(
        &self,
        id: &EncounterId,
        f: impl FnOnce(&mut Encounter) -> T,
    ) -> Result<T> {
        let mut encounters = self
            .encounters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let encounter = encounters
            .get_mut(id)
            .ok_or_else(|| RepositoryError::EncounterNotFound(id.clone()))?;
        Ok(f(encounter))
    }

    fn read<T>(&self, id: &EncounterId, f: impl FnOnce(&Encounter) -> T) -> Result<T> {
        let encounters = self
            .encounters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        encounters
            .get(id)
            .map(f)
            .ok_or_else(|| RepositoryError::EncounterNotFound(id.clone()))
    }
}

impl Default for InMemoryEncounterRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncounterRepository for InMemoryEncounterRepository {
    async fn combatants(&self, encounter: &EncounterId) -> Result<Vec<Combatant>> {
        self.read(encounter, |e| e.combatants.clone())
    }

    async fn flags(&self, encounter: &EncounterId) -> Result<EncounterFlags> {
        self.read(encounter, |e| e.flags.clone())
    }

    async fn set_flag(&self, encounter: &EncounterId, flag: EncounterFlag) -> Result<()> {
        self.with_encounter(encounter, |e| match flag {
            EncounterFlag::XpAwarded(awarded) => e.flags.xp_awarded = awarded,
            EncounterFlag::BankedCreatures(banked) => e.flags.banked_creatures = banked,
        })
    }

    async fn host_award(&self, encounter: &EncounterId) -> Result<Option<u32>> {
        self.read(encounter, |e| e.host_award)
    }
}
