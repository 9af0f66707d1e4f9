use super::actor::{ActorData, CreatureSnapshot};
use super::ids::{CombatantId, EncounterId};

/// Participant entry inside an encounter.
///
/// The actor is `None` when the host could not resolve the referenced
/// document (e.g. it was deleted from the world while still in combat).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub defeated: bool,
    pub actor: Option<ActorData>,
}

impl Combatant {
    /// Combatant named after its actor.
    pub fn new(id: impl Into<CombatantId>, actor: ActorData) -> Self {
        Self {
            id: id.into(),
            name: actor.name.clone(),
            defeated: false,
            actor: Some(actor),
        }
    }

    #[must_use]
    pub fn defeated(mut self) -> Self {
        self.defeated = true;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Lifecycle state of a combat session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EncounterState {
    #[default]
    Active,
    Ended,
}

/// Annotations this module persists on an encounter.
///
/// The host stores these as loose flags; here they are a typed record read and
/// written through the encounter repository.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterFlags {
    /// Set once XP has been distributed for the encounter.
    pub xp_awarded: bool,
    /// Defeated creatures whose combatants were removed before combat ended.
    pub banked_creatures: Vec<CreatureSnapshot>,
}

/// A combat session as stored by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Encounter {
    pub id: EncounterId,
    pub state: EncounterState,
    pub combatants: Vec<Combatant>,
    pub flags: EncounterFlags,
    /// Per-character award computed by the game system itself, if it offers one.
    pub host_award: Option<u32>,
}

impl Encounter {
    pub fn new(id: impl Into<EncounterId>, combatants: Vec<Combatant>) -> Self {
        Self {
            id: id.into(),
            combatants,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_host_award(mut self, award: u32) -> Self {
        self.host_award = Some(award);
        self
    }

    /// Removes a combatant, returning it if it was present.
    pub fn remove_combatant(&mut self, id: &CombatantId) -> Option<Combatant> {
        let index = self.combatants.iter().position(|c| &c.id == id)?;
        Some(self.combatants.remove(index))
    }
}
