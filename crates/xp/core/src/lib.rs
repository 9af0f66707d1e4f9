//! Encounter experience rules shared by the runtime and offline tools.
//!
//! `xp-core` owns the pure part of awarding XP after combat: the data model
//! for combatants and their actors, the level-difference table, eligibility
//! extraction, and the two award strategies. Nothing in this crate performs
//! I/O; persistence and host callbacks live in `xp-runtime`.
pub mod error;
pub mod extract;
pub mod state;
pub mod strategy;
pub mod system;
pub mod table;

pub use error::{CoreError, Result};
pub use extract::{Eligibility, PlayerEntry, defeated_creature, extract_eligibility};
pub use state::{
    ActorData, ActorId, ActorKind, Combatant, CombatantId, CreatureSnapshot, Encounter,
    EncounterFlags, EncounterId, EncounterState,
};
pub use strategy::{
    Award, AwardInput, AwardSource, AwardStrategy, LevelDifferenceStrategy, TotalXpStrategy,
    XpStrategy,
};
pub use system::{GameSystem, ShareRounding};
pub use table::{LEVEL_DIFFERENCE_TABLE, party_level, xp_for_level_difference};
