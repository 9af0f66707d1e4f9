use strum::{AsRefStr, Display, EnumString};

use super::ids::ActorId;

/// Actor type as reported by the host.
///
/// Any type string the rules do not care about parses as [`ActorKind::Other`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActorKind {
    Character,
    Npc,
    Hazard,
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

impl ActorKind {
    /// Parses a host type string, mapping unknown values to `Other`.
    pub fn parse(kind: &str) -> Self {
        kind.parse().unwrap_or(Self::Other)
    }

    /// NPCs and hazards are the only actors that yield XP when defeated.
    pub const fn is_creature(self) -> bool {
        matches!(self, Self::Npc | Self::Hazard)
    }
}

/// The host's view of the actor a combatant refers to.
///
/// Every attribute except the identity is optional on the host side; absent
/// values are treated as defaults by the rules rather than as errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorData {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub level: Option<i32>,
    pub hit_points: Option<i32>,
    /// Intrinsic XP value for systems that assign one per creature.
    pub xp: Option<u32>,
    /// Whether the actor is owned by a player rather than the GM.
    pub player_owned: bool,
}

impl ActorData {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Player-owned character.
    pub fn character(id: impl Into<ActorId>, name: impl Into<String>, level: i32) -> Self {
        Self {
            level: Some(level),
            player_owned: true,
            ..Self::new(id, name, ActorKind::Character)
        }
    }

    /// GM-owned NPC at the given level.
    pub fn npc(id: impl Into<ActorId>, name: impl Into<String>, level: i32) -> Self {
        Self {
            level: Some(level),
            ..Self::new(id, name, ActorKind::Npc)
        }
    }

    /// GM-owned hazard at the given level.
    pub fn hazard(id: impl Into<ActorId>, name: impl Into<String>, level: i32) -> Self {
        Self {
            level: Some(level),
            ..Self::new(id, name, ActorKind::Hazard)
        }
    }

    #[must_use]
    pub fn with_hit_points(mut self, hit_points: i32) -> Self {
        self.hit_points = Some(hit_points);
        self
    }

    #[must_use]
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = Some(xp);
        self
    }

    #[must_use]
    pub fn with_player_owned(mut self, player_owned: bool) -> Self {
        self.player_owned = player_owned;
        self
    }

    pub fn level_or_default(&self) -> i32 {
        self.level.unwrap_or_default()
    }

    /// Hit points are known and at or below zero.
    pub fn is_dead(&self) -> bool {
        self.hit_points.is_some_and(|hp| hp <= 0)
    }

    pub fn is_player_character(&self) -> bool {
        self.kind == ActorKind::Character && self.player_owned
    }
}

/// XP-relevant snapshot of a defeated creature.
///
/// Snapshots are independent of the live actor so they survive the removal of
/// the combatant that produced them (see banking in `xp-runtime`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSnapshot {
    pub id: ActorId,
    pub name: String,
    pub level: i32,
    pub kind: ActorKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp: u32,
}

impl CreatureSnapshot {
    /// Captures the XP-relevant attributes of an actor under a display name.
    pub fn capture(actor: &ActorData, name: impl Into<String>) -> Self {
        Self {
            id: actor.id.clone(),
            name: name.into(),
            level: actor.level_or_default(),
            kind: actor.kind,
            xp: actor.xp.unwrap_or_default(),
        }
    }
}
