//! Repository contracts for reading encounters and writing awards.

use async_trait::async_trait;
use xp_core::{ActorId, Combatant, CreatureSnapshot, EncounterFlags, EncounterId};

use super::Result;

/// A single typed write to an encounter's flags.
///
/// Flags are written one key at a time, mirroring how the host stores them.
/// There is no atomic read-modify-write; callers rely on serial delivery of
/// host events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncounterFlag {
    XpAwarded(bool),
    BankedCreatures(Vec<CreatureSnapshot>),
}

/// Access to the host's combat encounters.
#[async_trait]
pub trait EncounterRepository: Send + Sync {
    /// Combatants currently present in the encounter.
    async fn combatants(&self, encounter: &EncounterId) -> Result<Vec<Combatant>>;

    /// Current flag record; unset keys read as defaults.
    async fn flags(&self, encounter: &EncounterId) -> Result<EncounterFlags>;

    /// Persist one flag.
    async fn set_flag(&self, encounter: &EncounterId, flag: EncounterFlag) -> Result<()>;

    /// Per-character award the game system computed for this encounter.
    ///
    /// Systems without such a figure keep the default.
    async fn host_award(&self, _encounter: &EncounterId) -> Result<Option<u32>> {
        Ok(None)
    }
}

/// Access to player character XP.
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Current XP of a player character.
    async fn experience(&self, actor: &ActorId) -> Result<u32>;

    /// Overwrite a player character's XP.
    async fn set_experience(&self, actor: &ActorId, xp: u32) -> Result<()>;
}
