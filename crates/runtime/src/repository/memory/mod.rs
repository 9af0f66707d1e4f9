//! In-memory repository implementations for testing and development.

mod actor;
mod encounter;

pub use actor::InMemoryActorRepository;
pub use encounter::InMemoryEncounterRepository;
