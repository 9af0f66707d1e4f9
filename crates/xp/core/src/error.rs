//! Errors raised while interpreting XP configuration.
//!
//! Data problems in combatant or actor records are never errors here: missing
//! fields fall back to defaults during extraction. Only configuration values
//! that cannot be mapped to a supported rule set are rejected.

/// Errors surfaced by `xp-core`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The host reported a game system with no XP scheme.
    #[error("unsupported game system: {0}")]
    UnsupportedSystem(String),

    /// Share rounding mode was neither `floor` nor `ceil`.
    #[error("invalid rounding mode: {0}")]
    InvalidRounding(String),
}

pub type Result<T> = core::result::Result<T, CoreError>;
