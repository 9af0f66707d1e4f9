//! Handler registry for dispatching host events.

use std::sync::Arc;

use tracing::{debug, error, trace};

use super::{AwardHandler, BankingHandler, EventHandler, HandlerContext, HandlerCriticality};
use crate::api::{Result, RuntimeError};
use crate::events::HostEvent;

/// Registry that dispatches host events to handlers.
///
/// Handlers are sorted by priority once at construction. Every handler whose
/// `should_handle()` accepts the event runs, in order, even if an earlier one
/// failed non-critically.
pub struct HandlerRegistry {
    handlers: Arc<[Arc<dyn EventHandler>]>,
}

impl HandlerRegistry {
    /// Creates a registry; handlers are sorted by priority (lower first).
    pub fn new(mut handlers: Vec<Arc<dyn EventHandler>>) -> Self {
        handlers.sort_by_key(|h| h.priority());
        Self {
            handlers: handlers.into(),
        }
    }

    /// Creates a registry with the default set of handlers.
    ///
    /// Default handlers include:
    /// - BankingHandler: banks creatures removed mid-combat
    /// - AwardHandler: runs award cycles
    pub fn default_handlers() -> Self {
        Self::new(vec![
            Arc::new(BankingHandler) as Arc<dyn EventHandler>,
            Arc::new(AwardHandler) as Arc<dyn EventHandler>,
        ])
    }

    /// Runs every interested handler for `event`.
    ///
    /// # Error Handling
    ///
    /// Handler errors are handled based on criticality level:
    /// - `Critical`: Returns error immediately, aborting dispatch
    /// - `Important`: Logs error and continues to next handler (default)
    /// - `Optional`: Logs at debug level and continues silently
    ///
    /// Returns the number of handlers that ran.
    pub async fn dispatch(&self, event: &HostEvent, ctx: &HandlerContext) -> Result<usize> {
        let mut ran = 0;
        for handler in self.handlers.iter() {
            if !handler.should_handle(event) {
                continue;
            }
            trace!(
                target: "xp_runtime::handlers",
                handler = handler.name(),
                event = event.name(),
                "Dispatching"
            );
            ran += 1;
            if let Err(e) = handler.handle(event, ctx).await {
                self.handle_error(handler.as_ref(), event, e)?;
            }
        }
        Ok(ran)
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns an iterator over handler names and priorities (for debugging).
    pub fn handlers(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.handlers.iter().map(|h| (h.name(), h.priority()))
    }

    /// Returns Ok(()) for Important/Optional handlers, Err for Critical ones.
    fn handle_error(
        &self,
        handler: &dyn EventHandler,
        event: &HostEvent,
        error: RuntimeError,
    ) -> Result<()> {
        match handler.criticality() {
            HandlerCriticality::Critical => {
                error!(
                    target: "xp_runtime::handlers",
                    handler = handler.name(),
                    event = event.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical handler failed, aborting dispatch"
                );
                Err(error)
            }
            HandlerCriticality::Important => {
                error!(
                    target: "xp_runtime::handlers",
                    handler = handler.name(),
                    event = event.name(),
                    criticality = "important",
                    error = %error,
                    "Handler failed, continuing"
                );
                Ok(())
            }
            HandlerCriticality::Optional => {
                debug!(
                    target: "xp_runtime::handlers",
                    handler = handler.name(),
                    event = event.name(),
                    criticality = "optional",
                    error = %error,
                    "Optional handler failed"
                );
                Ok(())
            }
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::default_handlers()
    }
}
