//! Inbound host events.

use serde::{Deserialize, Serialize};
use xp_core::{Combatant, EncounterId};

use crate::processor::AwardTrigger;

/// Fields of an encounter update the runtime inspects.
///
/// Only keys present in the host's change set are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterChange {
    pub active: Option<bool>,
    pub round: Option<u32>,
    pub turn: Option<u32>,
}

impl EncounterChange {
    /// Combat was stopped, or its round counter reset.
    ///
    /// A turn reset alone is not an end signal: the turn counter returns to
    /// zero at the start of every round.
    pub fn ends_encounter(&self) -> bool {
        self.active == Some(false) || self.round == Some(0)
    }
}

/// Events delivered by the host, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// An encounter document changed.
    EncounterUpdated {
        encounter: EncounterId,
        #[serde(default)]
        change: EncounterChange,
    },

    /// An encounter document is being deleted.
    EncounterDeleted { encounter: EncounterId },

    /// A combatant was removed from an encounter.
    ///
    /// The payload carries the combatant as it was at removal time; it is no
    /// longer part of the encounter's combatant list.
    CombatantDeleted {
        encounter: EncounterId,
        combatant: Combatant,
    },

    /// The game system signalled that combat is complete.
    CombatComplete { encounter: EncounterId },
}

impl HostEvent {
    pub fn encounter(&self) -> &EncounterId {
        match self {
            HostEvent::EncounterUpdated { encounter, .. }
            | HostEvent::EncounterDeleted { encounter }
            | HostEvent::CombatantDeleted { encounter, .. }
            | HostEvent::CombatComplete { encounter } => encounter,
        }
    }

    /// The award trigger this event represents, if any.
    pub fn award_trigger(&self) -> Option<AwardTrigger> {
        match self {
            HostEvent::EncounterUpdated { change, .. } if change.ends_encounter() => {
                Some(AwardTrigger::Ended)
            }
            HostEvent::EncounterDeleted { .. } => Some(AwardTrigger::Deleted),
            HostEvent::CombatComplete { .. } => Some(AwardTrigger::Completed),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::EncounterUpdated { .. } => "encounter_updated",
            HostEvent::EncounterDeleted { .. } => "encounter_deleted",
            HostEvent::CombatantDeleted { .. } => "combatant_deleted",
            HostEvent::CombatComplete { .. } => "combat_complete",
        }
    }
}
