//! Handler for combatant removal.

use async_trait::async_trait;

use super::{EventHandler, HandlerContext};
use crate::api::Result;
use crate::events::HostEvent;

/// Banks defeated creatures whose combatants are removed mid-encounter.
///
/// Banking completes before the handler returns, so a later end-of-combat
/// event always sees the banked snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BankingHandler;

#[async_trait]
impl EventHandler for BankingHandler {
    fn name(&self) -> &'static str {
        "banking"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn should_handle(&self, event: &HostEvent) -> bool {
        matches!(event, HostEvent::CombatantDeleted { .. })
    }

    async fn handle(&self, event: &HostEvent, ctx: &HandlerContext) -> Result<()> {
        if let HostEvent::CombatantDeleted {
            encounter,
            combatant,
        } = event
        {
            ctx.banking.bank_if_defeated(encounter, combatant).await?;
        }
        Ok(())
    }
}
