//! Print the level-difference XP table.

use anyhow::Result;
use clap::Parser;
use xp_core::table::{MAX_LEVEL_DIFFERENCE, MIN_LEVEL_DIFFERENCE};
use xp_core::{party_level, xp_for_level_difference};

/// Print XP per character for each creature level difference
#[derive(Parser)]
pub struct Table {
    /// Player levels; when given, rows show creature levels for that party
    #[arg(value_name = "LEVEL", allow_negative_numbers = true)]
    party: Vec<i32>,
}

impl Table {
    pub fn execute(self) -> Result<()> {
        for line in self.rows() {
            println!("{line}");
        }
        Ok(())
    }

    fn rows(&self) -> Vec<String> {
        let base = (!self.party.is_empty()).then(|| party_level(self.party.iter().copied()));

        let mut rows = Vec::new();
        if let Some(level) = base {
            rows.push(format!("Party level {level}"));
        }
        for difference in MIN_LEVEL_DIFFERENCE..=MAX_LEVEL_DIFFERENCE {
            let xp = xp_for_level_difference(difference);
            rows.push(match base {
                Some(level) => format!("level {:>3} ({difference:+3}): {xp:>5} XP", level + difference),
                None => format!("{difference:+3}: {xp:>5} XP"),
            });
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_without_party() {
        let rows = Table::parse_from(["table"]).rows();
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0], " -4:    10 XP");
        assert_eq!(rows[14], "+10:  1280 XP");
    }

    #[test]
    fn test_rows_for_party() {
        let rows = Table::parse_from(["table", "3", "4"]).rows();
        assert_eq!(rows[0], "Party level 4");
        assert_eq!(rows[5], "level   4 ( +0):    40 XP");
    }
}
