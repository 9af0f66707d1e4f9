use super::{Award, AwardInput, AwardSource, AwardStrategy};
use crate::state::CreatureSnapshot;
use crate::system::ShareRounding;

/// Total creature XP divided across the party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TotalXpStrategy {
    pub rounding: ShareRounding,
}

impl AwardStrategy for TotalXpStrategy {
    fn describe_creature(&self, creature: &CreatureSnapshot, _party_level: i32) -> String {
        format!("{}: {} XP", creature.name, creature.xp)
    }

    fn compute_award(&self, input: &AwardInput<'_>) -> Award {
        let total_xp = input
            .creatures
            .iter()
            .map(|c| c.xp)
            .fold(0, u32::saturating_add);
        let player_count = input.player_count();

        Award {
            total_xp,
            xp_per_character: self.rounding.share(total_xp, player_count),
            player_count,
            creature_count: input.creatures.len(),
            party_level: None,
            source: AwardSource::Divided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PlayerEntry;
    use crate::state::ActorKind;

    fn players(n: usize) -> Vec<PlayerEntry> {
        (0..n)
            .map(|i| PlayerEntry {
                actor: format!("pc{i}").into(),
                name: format!("PC {i}"),
                level: 1,
            })
            .collect()
    }

    fn creatures(xp: &[u32]) -> Vec<CreatureSnapshot> {
        xp.iter()
            .enumerate()
            .map(|(i, &xp)| CreatureSnapshot {
                id: format!("m{i}").into(),
                name: format!("Monster {i}"),
                level: 1,
                kind: ActorKind::Npc,
                xp,
            })
            .collect()
    }

    #[test]
    fn test_floor_split() {
        let players = players(2);
        let creatures = creatures(&[30, 41]);
        let award = TotalXpStrategy::default().compute_award(&AwardInput::new(&players, &creatures));
        assert_eq!(award.total_xp, 71);
        assert_eq!(award.xp_per_character, 35);
        assert_eq!(award.distributed(), 70);
    }

    #[test]
    fn test_ceil_split() {
        let players = players(2);
        let creatures = creatures(&[30, 41]);
        let strategy = TotalXpStrategy {
            rounding: ShareRounding::Ceil,
        };
        assert_eq!(
            strategy
                .compute_award(&AwardInput::new(&players, &creatures))
                .xp_per_character,
            36
        );
    }

    #[test]
    fn test_no_players_no_share() {
        let creatures = creatures(&[100]);
        let award = TotalXpStrategy::default().compute_award(&AwardInput::new(&[], &creatures));
        assert_eq!(award.total_xp, 100);
        assert_eq!(award.xp_per_character, 0);
        assert!(!award.is_applicable());
    }

    #[test]
    fn test_host_award_ignored() {
        let players = players(1);
        let creatures = creatures(&[25]);
        let input = AwardInput::new(&players, &creatures).with_host_award(Some(999));
        assert_eq!(TotalXpStrategy::default().compute_award(&input).xp_per_character, 25);
    }
}
