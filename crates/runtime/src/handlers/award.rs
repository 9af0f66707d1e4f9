//! Handler for the end of an encounter.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{EventHandler, HandlerContext};
use crate::api::Result;
use crate::events::HostEvent;
use crate::processor::ProcessOutcome;

/// Runs the award cycle when an encounter ends, is deleted, or completes.
#[derive(Debug, Clone, Copy)]
pub struct AwardHandler;

#[async_trait]
impl EventHandler for AwardHandler {
    fn name(&self) -> &'static str {
        "award"
    }

    fn should_handle(&self, event: &HostEvent) -> bool {
        event.award_trigger().is_some()
    }

    async fn handle(&self, event: &HostEvent, ctx: &HandlerContext) -> Result<()> {
        let Some(trigger) = event.award_trigger() else {
            return Ok(());
        };
        let encounter = event.encounter();

        match ctx.processor.process(encounter, trigger).await? {
            ProcessOutcome::Completed(report) => info!(
                target: "xp_runtime::handlers",
                encounter = %encounter,
                trigger = %trigger,
                recipients = report.recipients.len(),
                failures = report.failures.len(),
                xp_per_character = report.award.xp_per_character,
                "Award cycle completed"
            ),
            outcome => debug!(
                target: "xp_runtime::handlers",
                encounter = %encounter,
                trigger = %trigger,
                outcome = ?outcome,
                "Award cycle skipped"
            ),
        }
        Ok(())
    }
}
