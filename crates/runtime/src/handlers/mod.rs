//! Host event handlers.
//!
//! Handlers decide which host events matter and turn them into banking or
//! award cycles. The registry runs every interested handler in priority order
//! and applies each handler's criticality to its failures.
//!
//! # Default handlers
//!
//! - [`BankingHandler`] (priority -10): snapshots defeated creatures on
//!   combatant removal
//! - [`AwardHandler`] (priority 0): runs the award cycle on end, deletion and
//!   completion signals

mod award;
mod banking;
mod registry;

pub use award::AwardHandler;
pub use banking::BankingHandler;
pub use registry::HandlerRegistry;

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::Result;
use crate::banking::BankingStore;
use crate::events::HostEvent;
use crate::processor::EncounterProcessor;

/// Defines the criticality level of a handler for error handling.
///
/// - Critical handlers must succeed or dispatch fails
/// - Important handlers log errors but allow continuation
/// - Optional handlers can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerCriticality {
    /// Handler failure fails the whole dispatch.
    Critical,

    /// Handler failure is logged as an error; dispatch continues.
    ///
    /// This is the default level. Host-facing failures must never surface
    /// as hard errors, so both built-in handlers use it.
    Important,

    /// Handler failure is logged at debug level and ignored.
    Optional,
}

/// Shared services handlers operate on.
#[derive(Clone)]
pub struct HandlerContext {
    pub processor: Arc<EncounterProcessor>,
    pub banking: BankingStore,
}

/// Reacts to host events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Returns a human-readable name for this handler (used in logging).
    fn name(&self) -> &'static str;

    /// Execution priority; lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the criticality level of this handler for error handling.
    fn criticality(&self) -> HandlerCriticality {
        HandlerCriticality::Important
    }

    /// Whether this handler wants the event.
    fn should_handle(&self, event: &HostEvent) -> bool;

    /// Handles an event this handler accepted.
    async fn handle(&self, event: &HostEvent, ctx: &HandlerContext) -> Result<()>;
}
