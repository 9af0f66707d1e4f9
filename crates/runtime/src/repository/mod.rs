//! Repository layer for host-owned records.
//!
//! The host owns encounter and actor documents; this crate only reads
//! combatants and writes two things back: player XP and the encounter flags.
//! In-memory implementations back tests and the replay CLI.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::{InMemoryActorRepository, InMemoryEncounterRepository};
pub use traits::{ActorRepository, EncounterFlag, EncounterRepository};
