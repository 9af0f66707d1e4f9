//! Data model for encounters, combatants and the actors they reference.
//!
//! These types mirror what the host exposes about a combat session. They are
//! plain values: the runtime loads them from repositories, and extraction
//! reads them without mutation.
mod actor;
mod encounter;
mod ids;

pub use actor::{ActorData, ActorKind, CreatureSnapshot};
pub use encounter::{Combatant, Encounter, EncounterFlags, EncounterState};
pub use ids::{ActorId, CombatantId, EncounterId};
