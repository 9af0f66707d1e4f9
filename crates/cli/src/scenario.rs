//! JSON scenarios: host records plus the events the host would deliver.
//!
//! ```json
//! {
//!   "actors": [
//!     { "id": "pc1", "name": "Amiri", "kind": "character", "level": 3, "xp": 0, "player_owned": true },
//!     { "id": "ogre", "name": "Ogre", "kind": "npc", "level": 5, "xp": 450 }
//!   ],
//!   "encounters": [
//!     { "id": "enc", "combatants": [
//!       { "id": "c1", "actor": "pc1" },
//!       { "id": "c2", "actor": "ogre", "defeated": true }
//!     ] }
//!   ],
//!   "events": [
//!     { "type": "encounter_updated", "encounter": "enc", "change": { "active": false } }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;
use xp_core::{ActorData, ActorId, Combatant, CombatantId, Encounter, EncounterId};
use xp_runtime::{
    EncounterChange, HostEvent, InMemoryActorRepository, InMemoryEncounterRepository, Notice,
    Topic, XpConfig, XpEvent, XpRuntime,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub actors: Vec<ActorData>,
    pub encounters: Vec<ScenarioEncounter>,
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioEncounter {
    pub id: EncounterId,
    #[serde(default)]
    pub combatants: Vec<ScenarioCombatant>,
    /// Per-character award the host's game system reports, if any.
    #[serde(default)]
    pub host_award: Option<u32>,
}

/// Combatant entry referring to a catalog actor by id.
#[derive(Debug, Deserialize)]
pub struct ScenarioCombatant {
    pub id: CombatantId,
    #[serde(default)]
    pub actor: Option<ActorId>,
    /// Display name; defaults to the actor's name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub defeated: bool,
    /// Overrides the actor's hit points for this combatant.
    #[serde(default)]
    pub hit_points: Option<i32>,
}

/// Host events, with combatant removals referring to the combatant by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    EncounterUpdated {
        encounter: EncounterId,
        #[serde(default)]
        change: EncounterChange,
    },
    EncounterDeleted {
        encounter: EncounterId,
    },
    CombatantDeleted {
        encounter: EncounterId,
        combatant: CombatantId,
    },
    CombatComplete {
        encounter: EncounterId,
    },
}

impl ScenarioEvent {
    pub fn encounter(&self) -> &EncounterId {
        match self {
            ScenarioEvent::EncounterUpdated { encounter, .. }
            | ScenarioEvent::EncounterDeleted { encounter }
            | ScenarioEvent::CombatantDeleted { encounter, .. }
            | ScenarioEvent::CombatComplete { encounter } => encounter,
        }
    }
}

/// Final XP of one player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerXp {
    pub id: ActorId,
    pub name: String,
    pub xp: u32,
}

/// What a replay did.
#[derive(Debug, Default, Serialize)]
pub struct ReplaySummary {
    pub players: Vec<PlayerXp>,
    pub notices: Vec<Notice>,
    pub awarded_encounters: Vec<EncounterId>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse scenario: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn catalog(&self) -> HashMap<&ActorId, &ActorData> {
        self.actors.iter().map(|actor| (&actor.id, actor)).collect()
    }

    fn build_encounters(&self) -> Vec<Encounter> {
        let catalog = self.catalog();
        self.encounters
            .iter()
            .map(|encounter| {
                let combatants = encounter
                    .combatants
                    .iter()
                    .map(|entry| entry.resolve(&catalog))
                    .collect();
                let mut built = Encounter::new(encounter.id.clone(), combatants);
                built.host_award = encounter.host_award;
                built
            })
            .collect()
    }

    fn player_characters(&self) -> impl Iterator<Item = &ActorData> {
        self.actors.iter().filter(|actor| actor.is_player_character())
    }

    /// Replays every event, in order, against fresh in-memory stores.
    pub async fn replay(&self, config: XpConfig) -> Result<ReplaySummary> {
        let encounters = Arc::new(InMemoryEncounterRepository::with_encounters(
            self.build_encounters(),
        ));
        let actors = Arc::new(InMemoryActorRepository::with_actors(
            self.player_characters()
                .map(|pc| (pc.id.clone(), pc.xp.unwrap_or_default())),
        ));

        let runtime = XpRuntime::builder(config)
            .encounters(encounters.clone())
            .actors(actors.clone())
            .build()?;
        let mut notices = runtime.subscribe(Topic::Notice);
        let mut awards = runtime.subscribe(Topic::Award);

        for event in &self.events {
            let Some(host_event) = stage(&encounters, event)? else {
                continue;
            };
            runtime.handle_event(&host_event).await?;
            if let ScenarioEvent::EncounterDeleted { encounter } = event {
                encounters.delete(encounter)?;
            }
        }

        let mut summary = ReplaySummary::default();
        while let Ok(event) = notices.try_recv() {
            if let XpEvent::Notice(notice) = event {
                summary.notices.push(notice);
            }
        }
        while let Ok(event) = awards.try_recv() {
            if let XpEvent::Awarded(report) = event {
                summary.awarded_encounters.push(report.encounter.clone());
            }
        }

        let xp: HashMap<ActorId, u32> = actors.snapshot()?.into_iter().collect();
        summary.players = self
            .player_characters()
            .map(|pc| PlayerXp {
                id: pc.id.clone(),
                name: pc.name.clone(),
                xp: xp.get(&pc.id).copied().unwrap_or_default(),
            })
            .collect();

        Ok(summary)
    }
}

impl ScenarioCombatant {
    fn resolve(&self, catalog: &HashMap<&ActorId, &ActorData>) -> Combatant {
        let actor = self.actor.as_ref().and_then(|id| {
            let found = catalog.get(id).map(|actor| (*actor).clone());
            if found.is_none() {
                warn!(combatant = %self.id, actor = %id, "Combatant references unknown actor");
            }
            found
        });
        let actor = actor.map(|mut actor| {
            if self.hit_points.is_some() {
                actor.hit_points = self.hit_points;
            }
            actor
        });

        let name = self
            .name
            .clone()
            .or_else(|| actor.as_ref().map(|a| a.name.clone()))
            .unwrap_or_else(|| self.id.to_string());

        Combatant {
            id: self.id.clone(),
            name,
            defeated: self.defeated,
            actor,
        }
    }
}

/// Applies the host-side effect of an event and returns what the host sends.
///
/// Ending combat marks the stored encounter ended; removing a combatant takes
/// it out of the encounter first and ships the removed record. Events for
/// encounters the scenario never declared are skipped.
fn stage(
    encounters: &InMemoryEncounterRepository,
    event: &ScenarioEvent,
) -> Result<Option<HostEvent>> {
    if encounters.get(event.encounter())?.is_none() {
        warn!(encounter = %event.encounter(), "Event for unknown encounter, skipping");
        return Ok(None);
    }

    let host_event = match event {
        ScenarioEvent::EncounterUpdated { encounter, change } => {
            if change.ends_encounter() {
                encounters.end(encounter)?;
            }
            HostEvent::EncounterUpdated {
                encounter: encounter.clone(),
                change: change.clone(),
            }
        }
        ScenarioEvent::EncounterDeleted { encounter } => HostEvent::EncounterDeleted {
            encounter: encounter.clone(),
        },
        ScenarioEvent::CombatantDeleted {
            encounter,
            combatant,
        } => match encounters.remove_combatant(encounter, combatant)? {
            Some(removed) => HostEvent::CombatantDeleted {
                encounter: encounter.clone(),
                combatant: removed,
            },
            None => {
                warn!(encounter = %encounter, combatant = %combatant, "Combatant not in encounter");
                return Ok(None);
            }
        },
        ScenarioEvent::CombatComplete { encounter } => HostEvent::CombatComplete {
            encounter: encounter.clone(),
        },
    };
    Ok(Some(host_event))
}
