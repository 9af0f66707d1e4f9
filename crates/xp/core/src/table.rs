//! Level-difference XP table and party level.
//!
//! A creature's XP contribution depends only on how far its level sits from
//! the party level. The table already yields a per-character amount, so the
//! level-difference scheme never divides by party size.

/// Lowest difference that still awards XP.
pub const MIN_LEVEL_DIFFERENCE: i32 = -4;

/// Differences above this saturate at the last table entry.
pub const MAX_LEVEL_DIFFERENCE: i32 = 10;

/// XP per character indexed by `difference - MIN_LEVEL_DIFFERENCE`.
pub const LEVEL_DIFFERENCE_TABLE: [u32; 15] = [
    10,   // -4
    15,   // -3
    20,   // -2
    30,   // -1
    40,   //  0
    60,   //  1
    80,   //  2
    120,  //  3
    160,  //  4
    240,  //  5
    320,  //  6
    480,  //  7
    640,  //  8
    960,  //  9
    1280, // 10
];

/// XP awarded per character for a creature `difference` levels above the party.
pub fn xp_for_level_difference(difference: i32) -> u32 {
    if difference < MIN_LEVEL_DIFFERENCE {
        return 0;
    }
    let clamped = difference.min(MAX_LEVEL_DIFFERENCE);
    LEVEL_DIFFERENCE_TABLE[(clamped - MIN_LEVEL_DIFFERENCE) as usize]
}

/// Average player level rounded half up, never below 1.
///
/// An empty party has level 1.
pub fn party_level(levels: impl IntoIterator<Item = i32>) -> i32 {
    let (sum, count) = levels
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), level| {
            (sum + i64::from(level), count + 1)
        });
    if count == 0 {
        return 1;
    }
    // floor((2 * sum + count) / (2 * count)) == round-half-up(sum / count)
    let rounded = (2 * sum + count).div_euclid(2 * count);
    rounded.max(1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_fixed_points() {
        assert_eq!(xp_for_level_difference(0), 40);
        assert_eq!(xp_for_level_difference(-4), 10);
        assert_eq!(xp_for_level_difference(2), 80);
        assert_eq!(xp_for_level_difference(10), 1280);
    }

    #[test]
    fn test_table_saturates_above_ten() {
        assert_eq!(xp_for_level_difference(11), 1280);
        assert_eq!(xp_for_level_difference(25), 1280);
    }

    #[test]
    fn test_table_zero_at_five_below() {
        assert_eq!(xp_for_level_difference(-5), 0);
        assert_eq!(xp_for_level_difference(-20), 0);
    }

    #[test]
    fn test_party_level_rounds_half_up() {
        assert_eq!(party_level([1, 2]), 2);
        assert_eq!(party_level([1, 1, 2]), 1);
        assert_eq!(party_level([3, 4, 4]), 4);
        assert_eq!(party_level([5]), 5);
    }

    #[test]
    fn test_party_level_floor_of_one() {
        assert_eq!(party_level([]), 1);
        assert_eq!(party_level([0, 0]), 1);
        assert_eq!(party_level([-1, 0]), 1);
    }
}
