//! Award strategies.
//!
//! A strategy turns the eligible players and defeated creatures of one
//! encounter into a per-character award. Exactly two schemes exist and the
//! runtime selects one when it is built, so the choice is modelled as the
//! closed [`XpStrategy`] enum rather than an open trait object.
mod level_difference;
mod total_xp;

pub use level_difference::LevelDifferenceStrategy;
pub use total_xp::TotalXpStrategy;

use crate::extract::PlayerEntry;
use crate::state::CreatureSnapshot;
use crate::system::{GameSystem, ShareRounding};

/// Everything a strategy may look at.
#[derive(Clone, Copy, Debug)]
pub struct AwardInput<'a> {
    pub players: &'a [PlayerEntry],
    pub creatures: &'a [CreatureSnapshot],
    /// Per-character award the game system computed itself, if any.
    pub host_award: Option<u32>,
}

impl<'a> AwardInput<'a> {
    pub fn new(players: &'a [PlayerEntry], creatures: &'a [CreatureSnapshot]) -> Self {
        Self {
            players,
            creatures,
            host_award: None,
        }
    }

    #[must_use]
    pub fn with_host_award(mut self, host_award: Option<u32>) -> Self {
        self.host_award = host_award;
        self
    }

    pub fn player_count(&self) -> u32 {
        u32::try_from(self.players.len()).unwrap_or(u32::MAX)
    }
}

/// Where the per-character figure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AwardSource {
    /// Summed from the level-difference table.
    LevelTable,
    /// Supplied by the game system for the whole encounter.
    Host,
    /// Creature XP total divided across the party.
    Divided,
}

/// Result of an award computation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Award {
    /// Total XP the creatures are worth under the active scheme.
    pub total_xp: u32,
    pub xp_per_character: u32,
    pub player_count: u32,
    pub creature_count: usize,
    /// Present for the level-difference scheme.
    pub party_level: Option<i32>,
    pub source: AwardSource,
}

impl Award {
    /// Nonzero award and at least one recipient.
    pub fn is_applicable(&self) -> bool {
        self.xp_per_character > 0 && self.player_count > 0
    }

    /// XP actually handed out across the party.
    ///
    /// This is `player_count * xp_per_character`, which may differ from
    /// `total_xp` when a divided total does not split evenly.
    pub fn distributed(&self) -> u64 {
        u64::from(self.player_count) * u64::from(self.xp_per_character)
    }
}

/// Operations every XP scheme provides.
pub trait AwardStrategy {
    /// One-line description of a creature's contribution, for summaries.
    fn describe_creature(&self, creature: &CreatureSnapshot, party_level: i32) -> String;

    /// Computes the per-character award for an encounter.
    fn compute_award(&self, input: &AwardInput<'_>) -> Award;

    /// New XP value for a character currently at `current_xp`.
    fn apply_award(&self, current_xp: u32, award: &Award) -> u32 {
        current_xp.saturating_add(award.xp_per_character)
    }
}

/// The XP scheme selected for the running game system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XpStrategy {
    LevelDifference(LevelDifferenceStrategy),
    TotalXp(TotalXpStrategy),
}

impl XpStrategy {
    /// Strategy for a game system.
    ///
    /// `rounding` only affects the divided scheme; `prefer_host_award` only
    /// affects the level-difference scheme.
    pub fn for_system(system: GameSystem, rounding: ShareRounding, prefer_host_award: bool) -> Self {
        match system {
            GameSystem::Pf2e => Self::LevelDifference(LevelDifferenceStrategy { prefer_host_award }),
            GameSystem::Dnd5e => Self::TotalXp(TotalXpStrategy { rounding }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LevelDifference(_) => "level-difference",
            Self::TotalXp(_) => "total-xp",
        }
    }

    fn inner(&self) -> &dyn AwardStrategy {
        match self {
            Self::LevelDifference(strategy) => strategy,
            Self::TotalXp(strategy) => strategy,
        }
    }
}

impl AwardStrategy for XpStrategy {
    fn describe_creature(&self, creature: &CreatureSnapshot, party_level: i32) -> String {
        self.inner().describe_creature(creature, party_level)
    }

    fn compute_award(&self, input: &AwardInput<'_>) -> Award {
        self.inner().compute_award(input)
    }

    fn apply_award(&self, current_xp: u32, award: &Award) -> u32 {
        self.inner().apply_award(current_xp, award)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_system_selects_scheme() {
        let pf2e = XpStrategy::for_system(GameSystem::Pf2e, ShareRounding::Ceil, false);
        assert_eq!(
            pf2e,
            XpStrategy::LevelDifference(LevelDifferenceStrategy {
                prefer_host_award: false
            })
        );
        let dnd5e = XpStrategy::for_system(GameSystem::Dnd5e, ShareRounding::Ceil, true);
        assert_eq!(
            dnd5e,
            XpStrategy::TotalXp(TotalXpStrategy {
                rounding: ShareRounding::Ceil
            })
        );
        assert_eq!(dnd5e.name(), "total-xp");
    }

    #[test]
    fn test_apply_award_saturates() {
        let strategy = XpStrategy::for_system(GameSystem::Dnd5e, ShareRounding::Floor, true);
        let award = Award {
            total_xp: 10,
            xp_per_character: 10,
            player_count: 1,
            creature_count: 1,
            party_level: None,
            source: AwardSource::Divided,
        };
        assert_eq!(strategy.apply_award(5, &award), 15);
        assert_eq!(strategy.apply_award(u32::MAX - 3, &award), u32::MAX);
    }

    #[test]
    fn test_distributed_is_share_times_players() {
        let award = Award {
            total_xp: 71,
            xp_per_character: 35,
            player_count: 2,
            creature_count: 2,
            party_level: None,
            source: AwardSource::Divided,
        };
        assert_eq!(award.distributed(), 70);
        assert!(award.is_applicable());
    }
}
