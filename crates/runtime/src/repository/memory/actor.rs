//! In-memory actor XP repository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use xp_core::ActorId;

use crate::repository::{ActorRepository, RepositoryError, Result};

/// In-memory player XP store for testing and development.
///
/// Only registered actors can be read or written; unknown ids fail with
/// [`RepositoryError::ActorNotFound`] like a host update on a missing document.
pub struct InMemoryActorRepository {
    experience: RwLock<HashMap<ActorId, u32>>,
}

impl InMemoryActorRepository {
    /// Create a new empty in-memory actor repository.
    pub fn new() -> Self {
        Self {
            experience: RwLock::new(HashMap::new()),
        }
    }

    /// Create a repository with actors at the given XP.
    pub fn with_actors<I, A>(actors: I) -> Self
    where
        I: IntoIterator<Item = (A, u32)>,
        A: Into<ActorId>,
    {
        Self {
            experience: RwLock::new(actors.into_iter().map(|(id, xp)| (id.into(), xp)).collect()),
        }
    }

    /// Register an actor at the given XP.
    pub fn insert(&self, actor: impl Into<ActorId>, xp: u32) -> Result<()> {
        let mut experience = self
            .experience
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        experience.insert(actor.into(), xp);
        Ok(())
    }

    /// All actors and their XP, sorted by id.
    pub fn snapshot(&self) -> Result<Vec<(ActorId, u32)>> {
        let experience = self
            .experience
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut entries: Vec<_> = experience.iter().map(|(id, xp)| (id.clone(), *xp)).collect();
        entries.sort();
        Ok(entries)
    }
}

impl Default for InMemoryActorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorRepository for InMemoryActorRepository {
    async fn experience(&self, actor: &ActorId) -> Result<u32> {
        let experience = self
            .experience
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        experience
            .get(actor)
            .copied()
            .ok_or_else(|| RepositoryError::ActorNotFound(actor.clone()))
    }

    async fn set_experience(&self, actor: &ActorId, xp: u32) -> Result<()> {
        let mut experience = self
            .experience
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let entry = experience
            .get_mut(actor)
            .ok_or_else(|| RepositoryError::ActorNotFound(actor.clone()))?;
        *entry = xp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_write() {
        let repo = InMemoryActorRepository::with_actors([("pc", 100)]);
        let id = ActorId::new("pc");

        assert_eq!(repo.experience(&id).await.unwrap(), 100);
        repo.set_experience(&id, 140).await.unwrap();
        assert_eq!(repo.experience(&id).await.unwrap(), 140);
    }

    #[tokio::test]
    async fn test_unknown_actor() {
        let repo = InMemoryActorRepository::new();
        let id = ActorId::new("ghost");
        assert!(matches!(
            repo.set_experience(&id, 1).await,
            Err(RepositoryError::ActorNotFound(_))
        ));
    }

    #[test]
    fn test_snapshot_sorted() {
        let repo = InMemoryActorRepository::with_actors([("b", 2), ("a", 1)]);
        let snapshot = repo.snapshot().unwrap();
        assert_eq!(snapshot, vec![(ActorId::new("a"), 1), (ActorId::new("b"), 2)]);
    }
}
