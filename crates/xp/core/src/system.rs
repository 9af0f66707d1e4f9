//! Game system discriminator and share rounding.
use core::str::FromStr;

use strum::{Display, EnumString};

use crate::error::CoreError;

/// Game systems with a supported XP scheme.
///
/// The discriminator is read once when the runtime is built; an unknown value
/// leaves the runtime inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameSystem {
    /// Pathfinder 2e: XP from the level-difference table.
    Pf2e,
    /// D&D 5e: each creature carries an XP value, split across the party.
    Dnd5e,
}

impl GameSystem {
    /// Resolves a host system id, rejecting systems without an XP scheme.
    pub fn detect(id: &str) -> Result<Self, CoreError> {
        id.trim()
            .parse()
            .map_err(|_| CoreError::UnsupportedSystem(id.to_owned()))
    }
}

/// How a divided XP total is rounded per character.
///
/// Both variants drop or add at most `players - 1` XP overall; the applied sum
/// is always `players * share`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShareRounding {
    #[default]
    Floor,
    Ceil,
}

impl ShareRounding {
    /// Divides `total` by `players`; zero players yield a zero share.
    pub const fn share(self, total: u32, players: u32) -> u32 {
        if players == 0 {
            return 0;
        }
        match self {
            Self::Floor => total / players,
            Self::Ceil => total.div_ceil(players),
        }
    }
}

impl FromStr for ShareRounding {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floor" | "down" => Ok(Self::Floor),
            "ceil" | "up" => Ok(Self::Ceil),
            _ => Err(CoreError::InvalidRounding(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_system() {
        assert_eq!(GameSystem::detect("pf2e"), Ok(GameSystem::Pf2e));
        assert_eq!(GameSystem::detect("DND5E"), Ok(GameSystem::Dnd5e));
        assert_eq!(
            GameSystem::detect("swade"),
            Err(CoreError::UnsupportedSystem("swade".into()))
        );
    }

    #[test]
    fn test_share_rounding() {
        assert_eq!(ShareRounding::Floor.share(71, 2), 35);
        assert_eq!(ShareRounding::Ceil.share(71, 2), 36);
        assert_eq!(ShareRounding::Ceil.share(70, 2), 35);
        assert_eq!(ShareRounding::Floor.share(71, 0), 0);
        assert_eq!(ShareRounding::Ceil.share(0, 3), 0);
    }

    #[test]
    fn test_parse_rounding() {
        assert_eq!("Floor".parse(), Ok(ShareRounding::Floor));
        assert_eq!(" ceil ".parse(), Ok(ShareRounding::Ceil));
        assert!("nearest".parse::<ShareRounding>().is_err());
    }
}
