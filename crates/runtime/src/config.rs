//! Runtime configuration structures and loaders.
use std::env;

use strum::{Display, EnumString};
use xp_core::ShareRounding;

/// Role of the user whose client delivers host events.
///
/// Only GM-privileged clients (assistant or full gamemaster) mutate encounter
/// and actor records; every other role ignores events so awards are not
/// applied once per client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserRole {
    Player,
    Trusted,
    Assistant,
    #[default]
    #[strum(serialize = "gamemaster", serialize = "gm")]
    Gamemaster,
}

impl UserRole {
    /// Assistant GMs hold the same record permissions as the gamemaster.
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Assistant | Self::Gamemaster)
    }
}

/// Configuration required to build an [`XpRuntime`](crate::XpRuntime).
#[derive(Clone, Debug)]
pub struct XpConfig {
    /// Host game system id, resolved once at build time.
    pub system: String,
    pub rounding: ShareRounding,
    pub prefer_host_award: bool,
    pub chat_summary: bool,
    pub event_buffer_size: usize,
    pub role: UserRole,
}

impl Default for XpConfig {
    fn default() -> Self {
        Self {
            system: "pf2e".to_owned(),
            rounding: ShareRounding::Floor,
            prefer_host_award: true,
            chat_summary: false,
            event_buffer_size: 100,
            role: UserRole::Gamemaster,
        }
    }
}

impl XpConfig {
    /// Creates the default configuration for a system id.
    pub fn for_system(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUTO_XP_SYSTEM` - Game system id (default: pf2e)
    /// - `AUTO_XP_ROUNDING` - `floor` or `ceil` share rounding (default: floor)
    /// - `AUTO_XP_PREFER_HOST_AWARD` - Use the host's encounter award when present (default: true)
    /// - `AUTO_XP_CHAT_SUMMARY` - Also post the award summary to chat (default: false)
    /// - `AUTO_XP_EVENT_BUFFER` - Broadcast capacity per event topic (default: 100)
    /// - `AUTO_XP_ROLE` - Role of the local user (default: gamemaster)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(system) = env::var("AUTO_XP_SYSTEM")
            && !system.trim().is_empty()
        {
            config.system = system.trim().to_owned();
        }

        if let Some(rounding) = read_env::<ShareRounding>("AUTO_XP_ROUNDING") {
            config.rounding = rounding;
        }

        if let Some(prefer) = read_env::<bool>("AUTO_XP_PREFER_HOST_AWARD") {
            config.prefer_host_award = prefer;
        }

        if let Some(chat) = read_env::<bool>("AUTO_XP_CHAT_SUMMARY") {
            config.chat_summary = chat;
        }

        if let Some(capacity) = read_env::<usize>("AUTO_XP_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(role) = read_env::<UserRole>("AUTO_XP_ROLE") {
            config.role = role;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = XpConfig::default();
        assert_eq!(config.system, "pf2e");
        assert_eq!(config.rounding, ShareRounding::Floor);
        assert!(config.prefer_host_award);
        assert!(!config.chat_summary);
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.role, UserRole::Gamemaster);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("GM".parse(), Ok(UserRole::Gamemaster));
        assert_eq!("gamemaster".parse(), Ok(UserRole::Gamemaster));
        assert_eq!("Player".parse(), Ok(UserRole::Player));
        assert!(UserRole::Assistant.is_privileged());
        assert!(UserRole::Gamemaster.is_privileged());
        assert!(!UserRole::Trusted.is_privileged());
        assert!(!UserRole::Player.is_privileged());
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_for_system() {
        let config = XpConfig::for_system("dnd5e");
        assert_eq!(config.system, "dnd5e");
        assert!(config.prefer_host_award);
    }
}
