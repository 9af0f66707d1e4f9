//! Unified error types surfaced by the runtime API.
//!
//! Wraps repository failures and missing collaborators so handlers and
//! host glue can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} repository not set")]
    MissingRepository { kind: RepositoryKind },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepositoryKind {
    Encounter,
    Actor,
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepositoryKind::Encounter => "encounter",
            RepositoryKind::Actor => "actor",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xp_core::EncounterId;

    fn lookup() -> Result<()> {
        Err(RepositoryError::EncounterNotFound(EncounterId::new("enc")))?;
        Ok(())
    }

    #[test]
    fn test_repository_error_converts() {
        let err = lookup().unwrap_err();
        assert!(matches!(err, RuntimeError::Repository(_)));
        assert_eq!(err.to_string(), "encounter not found: enc");
    }

    #[test]
    fn test_missing_repository_message() {
        let err = RuntimeError::MissingRepository {
            kind: RepositoryKind::Actor,
        };
        assert_eq!(err.to_string(), "actor repository not set");
    }
}
