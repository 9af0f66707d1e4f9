use super::{Award, AwardInput, AwardSource, AwardStrategy};
use crate::state::CreatureSnapshot;
use crate::table::{party_level, xp_for_level_difference};

/// Level-difference table scheme.
///
/// Each defeated creature is worth the table value for its level relative to
/// the party level, per character. When the game system reports its own
/// encounter award and `prefer_host_award` is set, that figure wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDifferenceStrategy {
    pub prefer_host_award: bool,
}

impl Default for LevelDifferenceStrategy {
    fn default() -> Self {
        Self {
            prefer_host_award: true,
        }
    }
}

impl AwardStrategy for LevelDifferenceStrategy {
    fn describe_creature(&self, creature: &CreatureSnapshot, party_level: i32) -> String {
        let difference = creature.level - party_level;
        format!(
            "{} (level {}, {:+}): {} XP",
            creature.name,
            creature.level,
            difference,
            xp_for_level_difference(difference)
        )
    }

    fn compute_award(&self, input: &AwardInput<'_>) -> Award {
        let party_level = party_level(input.players.iter().map(|p| p.level));
        let table_xp: u32 = input
            .creatures
            .iter()
            .map(|c| xp_for_level_difference(c.level - party_level))
            .fold(0, u32::saturating_add);

        let (xp, source) = match input.host_award {
            Some(host) if self.prefer_host_award => (host, AwardSource::Host),
            _ => (table_xp, AwardSource::LevelTable),
        };

        Award {
            total_xp: xp,
            xp_per_character: xp,
            player_count: input.player_count(),
            creature_count: input.creatures.len(),
            party_level: Some(party_level),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PlayerEntry;
    use crate::state::ActorKind;

    fn player(id: &str, level: i32) -> PlayerEntry {
        PlayerEntry {
            actor: id.into(),
            name: id.to_owned(),
            level,
        }
    }

    fn creature(id: &str, level: i32) -> CreatureSnapshot {
        CreatureSnapshot {
            id: id.into(),
            name: id.to_owned(),
            level,
            kind: ActorKind::Npc,
            xp: 0,
        }
    }

    #[test]
    fn test_same_level_creature_is_forty() {
        let players = [player("a", 3), player("b", 3)];
        let creatures = [creature("orc", 3)];
        let award = LevelDifferenceStrategy::default().compute_award(&AwardInput::new(&players, &creatures));
        assert_eq!(award.party_level, Some(3));
        assert_eq!(award.xp_per_character, 40);
        assert_eq!(award.source, AwardSource::LevelTable);
    }

    #[test]
    fn test_contributions_sum_without_division() {
        let players = [player("a", 2), player("b", 2), player("c", 3)];
        // party level round(7/3) = 2
        let creatures = [creature("boss", 4), creature("minion", 0), creature("rat", -3)];
        let award = LevelDifferenceStrategy::default().compute_award(&AwardInput::new(&players, &creatures));
        assert_eq!(award.party_level, Some(2));
        assert_eq!(award.xp_per_character, 80 + 20 + 0);
        assert_eq!(award.player_count, 3);
        assert_eq!(award.creature_count, 3);
    }

    #[test]
    fn test_far_above_saturates() {
        let players = [player("a", 1)];
        let creatures = [creature("dragon", 20)];
        let award = LevelDifferenceStrategy::default().compute_award(&AwardInput::new(&players, &creatures));
        assert_eq!(award.xp_per_character, 1280);
    }

    #[test]
    fn test_host_award_preferred_when_enabled() {
        let players = [player("a", 1)];
        let creatures = [creature("goblin", 1)];
        let input = AwardInput::new(&players, &creatures).with_host_award(Some(90));

        let preferred = LevelDifferenceStrategy::default().compute_award(&input);
        assert_eq!(preferred.xp_per_character, 90);
        assert_eq!(preferred.source, AwardSource::Host);

        let table = LevelDifferenceStrategy {
            prefer_host_award: false,
        }
        .compute_award(&input);
        assert_eq!(table.xp_per_character, 40);
    }

    #[test]
    fn test_describe_creature() {
        let text = LevelDifferenceStrategy::default().describe_creature(&creature("Ogre", 5), 3);
        assert_eq!(text, "Ogre (level 5, +2): 80 XP");
    }
}
