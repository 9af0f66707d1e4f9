//! Eligibility extraction from an encounter's combatant list.
//!
//! Extraction is a pure read of the *currently present* combatants. Creatures
//! whose combatants were removed mid-combat are not visible here; the runtime
//! merges them back from the banked list afterwards.
use std::collections::HashSet;

use crate::state::{ActorId, Combatant, CreatureSnapshot};

/// Player character eligible for an award.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEntry {
    pub actor: ActorId,
    pub name: String,
    pub level: i32,
}

/// Players and defeated creatures found in one combatant list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Eligibility {
    /// Deduplicated by actor id, in first-seen order.
    pub players: Vec<PlayerEntry>,
    pub defeated_creatures: Vec<CreatureSnapshot>,
}

impl Eligibility {
    /// Appends banked creatures after the live ones.
    pub fn merge_banked(&mut self, banked: impl IntoIterator<Item = CreatureSnapshot>) {
        self.defeated_creatures.extend(banked);
    }
}

/// Snapshot of a combatant's creature if it counts as defeated.
///
/// A creature counts when its combatant is marked defeated or its hit points
/// are known and at or below zero. Non-creatures and unresolved actors yield
/// `None`.
pub fn defeated_creature(combatant: &Combatant) -> Option<CreatureSnapshot> {
    let actor = combatant.actor.as_ref()?;
    if !actor.kind.is_creature() {
        return None;
    }
    (combatant.defeated || actor.is_dead()).then(|| CreatureSnapshot::capture(actor, &combatant.name))
}

/// Splits a combatant list into eligible players and defeated creatures.
pub fn extract_eligibility<'a>(combatants: impl IntoIterator<Item = &'a Combatant>) -> Eligibility {
    let mut seen = HashSet::new();
    let mut eligibility = Eligibility::default();

    for combatant in combatants {
        let Some(actor) = combatant.actor.as_ref() else {
            continue;
        };

        if actor.is_player_character() {
            if seen.insert(actor.id.clone()) {
                eligibility.players.push(PlayerEntry {
                    actor: actor.id.clone(),
                    name: actor.name.clone(),
                    level: actor.level_or_default(),
                });
            }
        } else if let Some(creature) = defeated_creature(combatant) {
            eligibility.defeated_creatures.push(creature);
        }
    }

    eligibility
}
