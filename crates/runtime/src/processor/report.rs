//! Outcome types of an award cycle.

use std::fmt;

use serde::{Deserialize, Serialize};
use xp_core::{ActorId, Award, EncounterId};

/// What started an award cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AwardTrigger {
    /// Combat stopped or its round counter reset.
    Ended,
    /// The encounter document is being deleted.
    Deleted,
    /// The game system signalled combat completion.
    Completed,
}

impl AwardTrigger {
    /// Whether the cycle should persist the awarded flag afterwards.
    ///
    /// Deletion skips it: the flag write would race the document's own
    /// destruction.
    pub const fn marks_processed(self) -> bool {
        !matches!(self, AwardTrigger::Deleted)
    }
}

impl fmt::Display for AwardTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AwardTrigger::Ended => "ended",
            AwardTrigger::Deleted => "deleted",
            AwardTrigger::Completed => "completed",
        };
        write!(f, "{}", label)
    }
}

/// XP applied to one player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAward {
    pub actor: ActorId,
    pub name: String,
    pub previous_xp: u32,
    pub new_xp: u32,
}

/// A player whose XP update failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFailure {
    pub actor: ActorId,
    pub name: String,
    pub error: String,
}

/// Everything one award cycle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardReport {
    pub encounter: EncounterId,
    pub trigger: AwardTrigger,
    pub award: Award,
    pub recipients: Vec<PlayerAward>,
    pub failures: Vec<PlayerFailure>,
    /// The awarded flag was written successfully.
    pub marked_processed: bool,
}

impl AwardReport {
    /// XP written to player records.
    pub fn applied_xp(&self) -> u64 {
        self.recipients
            .iter()
            .map(|r| u64::from(r.new_xp.saturating_sub(r.previous_xp)))
            .sum()
    }
}

/// Result of asking the processor to handle an encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The encounter was awarded before; nothing was changed.
    AlreadyAwarded,
    /// Another cycle for this encounter is running; this trigger was dropped.
    InFlight,
    /// An award cycle ran to completion.
    Completed(Box<AwardReport>),
}

impl ProcessOutcome {
    pub fn report(&self) -> Option<&AwardReport> {
        match self {
            ProcessOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}
