//! Banking of creatures removed before combat ends.
//!
//! When the GM removes a defeated creature's combatant mid-encounter, its live
//! record is gone by the time the award cycle runs. The banking store captures
//! a snapshot at deletion time and appends it to the encounter's banked list,
//! which the processor merges back in.

use std::sync::Arc;

use tracing::{debug, info};
use xp_core::{Combatant, CreatureSnapshot, EncounterId, defeated_creature};

use crate::api::Result;
use crate::events::{EventBus, XpEvent};
use crate::repository::{EncounterFlag, EncounterRepository};

/// Reads and appends to the per-encounter banked creature list.
#[derive(Clone)]
pub struct BankingStore {
    encounters: Arc<dyn EncounterRepository>,
    events: EventBus,
}

impl BankingStore {
    pub fn new(encounters: Arc<dyn EncounterRepository>, events: EventBus) -> Self {
        Self { encounters, events }
    }

    /// Banks the combatant's creature if it is defeated or dead.
    ///
    /// Returns the stored snapshot, or `None` when the combatant does not
    /// qualify or the encounter was already awarded. The list is read,
    /// extended and written back without any atomicity guarantee.
    pub async fn bank_if_defeated(
        &self,
        encounter: &EncounterId,
        combatant: &Combatant,
    ) -> Result<Option<CreatureSnapshot>> {
        let Some(snapshot) = defeated_creature(combatant) else {
            debug!(
                target: "xp_runtime::banking",
                encounter = %encounter,
                combatant = %combatant.id,
                "Removed combatant is not a defeated creature"
            );
            return Ok(None);
        };

        let flags = self.encounters.flags(encounter).await?;
        if flags.xp_awarded {
            debug!(
                target: "xp_runtime::banking",
                encounter = %encounter,
                combatant = %combatant.id,
                "Encounter already awarded, not banking"
            );
            return Ok(None);
        }

        let mut banked = flags.banked_creatures;
        banked.push(snapshot.clone());
        let count = banked.len();
        self.encounters
            .set_flag(encounter, EncounterFlag::BankedCreatures(banked))
            .await?;

        info!(
            target: "xp_runtime::banking",
            encounter = %encounter,
            creature = %snapshot.id,
            level = snapshot.level,
            banked = count,
            "Banked defeated creature"
        );
        self.events.publish(XpEvent::Banked {
            encounter: encounter.clone(),
            creature: snapshot.clone(),
        });

        Ok(Some(snapshot))
    }

    /// Creatures banked so far for an encounter.
    pub async fn banked(&self, encounter: &EncounterId) -> Result<Vec<CreatureSnapshot>> {
        Ok(self.encounters.flags(encounter).await?.banked_creatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryEncounterRepository;
    use xp_core::{ActorData, Encounter};

    fn store() -> (Arc<InMemoryEncounterRepository>, BankingStore) {
        let repo = Arc::new(InMemoryEncounterRepository::with_encounters([Encounter::new(
            "enc",
            vec![],
        )]));
        let store = BankingStore::new(repo.clone(), EventBus::new());
        (repo, store)
    }

    #[tokio::test]
    async fn test_banks_defeated_creatures_in_order() {
        let (_, store) = store();
        let id = EncounterId::new("enc");

        let first = Combatant::new("c1", ActorData::npc("g1", "Goblin", 1)).defeated();
        let second = Combatant::new("c2", ActorData::hazard("t1", "Trap", 3).with_hit_points(0));
        assert!(store.bank_if_defeated(&id, &first).await.unwrap().is_some());
        assert!(store.bank_if_defeated(&id, &second).await.unwrap().is_some());

        let banked = store.banked(&id).await.unwrap();
        let ids: Vec<_> = banked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["g1", "t1"]);
    }

    #[tokio::test]
    async fn test_living_creatures_and_players_not_banked() {
        let (_, store) = store();
        let id = EncounterId::new("enc");

        let alive = Combatant::new("c1", ActorData::npc("g1", "Goblin", 1).with_hit_points(4));
        let hero = Combatant::new("c2", ActorData::character("pc", "Merisiel", 1)).defeated();
        assert!(store.bank_if_defeated(&id, &alive).await.unwrap().is_none());
        assert!(store.bank_if_defeated(&id, &hero).await.unwrap().is_none());
        assert!(store.banked(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_awarded_encounter_not_banked() {
        let (repo, store) = store();
        let id = EncounterId::new("enc");
        repo.set_flag(&id, EncounterFlag::XpAwarded(true)).await.unwrap();

        let goblin = Combatant::new("c1", ActorData::npc("g1", "Goblin", 1)).defeated();
        assert!(store.bank_if_defeated(&id, &goblin).await.unwrap().is_none());
    }
}
