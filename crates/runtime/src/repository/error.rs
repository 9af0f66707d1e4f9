//! Error types raised by repository implementations.

use thiserror::Error;
use xp_core::{ActorId, EncounterId};

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("encounter not found: {0}")]
    EncounterNotFound(EncounterId),

    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// Failure reported by the host's storage layer.
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
