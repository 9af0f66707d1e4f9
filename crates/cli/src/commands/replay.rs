//! Replay a scenario file through the runtime.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use xp_core::ShareRounding;
use xp_runtime::{UserRole, XpConfig};

use crate::scenario::{ReplaySummary, Scenario};

/// Replay a JSON scenario of host events
#[derive(Parser)]
pub struct Replay {
    /// Scenario file (actors, encounters, events)
    #[arg(value_name = "SCENARIO")]
    path: PathBuf,

    /// Game system id (overrides AUTO_XP_SYSTEM)
    #[arg(short, long, value_name = "SYSTEM")]
    system: Option<String>,

    /// Role of the replaying user (overrides AUTO_XP_ROLE)
    #[arg(short, long, value_name = "ROLE")]
    role: Option<UserRole>,

    /// Share rounding for divided totals (overrides AUTO_XP_ROUNDING)
    #[arg(long, value_name = "MODE")]
    rounding: Option<ShareRounding>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Final XP per player character and notices
    Summary,
    /// Full JSON output
    Json,
}

impl Replay {
    pub async fn execute(self) -> Result<()> {
        let scenario = Scenario::load(&self.path)?;
        let config = self.config(XpConfig::from_env());

        tracing::info!(
            scenario = %self.path.display(),
            system = %config.system,
            events = scenario.events.len(),
            "Replaying scenario"
        );

        let summary = scenario.replay(config).await?;
        match self.format {
            OutputFormat::Summary => print_summary(&summary),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        }
        Ok(())
    }

    fn config(&self, mut config: XpConfig) -> XpConfig {
        if let Some(system) = &self.system {
            config.system = system.clone();
        }
        if let Some(role) = self.role {
            config.role = role;
        }
        if let Some(rounding) = self.rounding {
            config.rounding = rounding;
        }
        config
    }
}

fn print_summary(summary: &ReplaySummary) {
    for notice in &summary.notices {
        println!("{}", notice.message());
    }
    if !summary.notices.is_empty() {
        println!();
    }

    let width = summary
        .players
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or_default();
    for player in &summary.players {
        println!("{:<width$}  {:>6} XP  ({})", player.name, player.xp, player.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Replay::parse_from([
            "replay",
            "scenario.json",
            "--system",
            "dnd5e",
            "--role",
            "player",
            "--rounding",
            "ceil",
        ]);
        let config = cli.config(XpConfig::default());
        assert_eq!(config.system, "dnd5e");
        assert_eq!(config.role, UserRole::Player);
        assert_eq!(config.rounding, ShareRounding::Ceil);
    }

    #[test]
    fn test_defaults_kept() {
        let cli = Replay::parse_from(["replay", "scenario.json"]);
        let config = cli.config(XpConfig::for_system("pf2e"));
        assert_eq!(config.system, "pf2e");
        assert_eq!(config.role, UserRole::Gamemaster);
    }
}
