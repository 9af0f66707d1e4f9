//! High-level runtime orchestrator.
//!
//! The runtime resolves the game system once, wires the processor and banking
//! store to the host repositories, and routes host events through the handler
//! registry. Builders fail on missing repositories; an unsupported game system
//! yields an inert runtime instead of an error.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};
use xp_core::{GameSystem, XpStrategy};

use crate::api::{RepositoryKind, Result, RuntimeError};
use crate::banking::BankingStore;
use crate::config::{UserRole, XpConfig};
use crate::events::{EventBus, HostEvent, Topic, XpEvent};
use crate::handlers::{HandlerContext, HandlerRegistry};
use crate::notify::Notifier;
use crate::processor::EncounterProcessor;
use crate::repository::{ActorRepository, EncounterRepository};

struct Active {
    system: GameSystem,
    registry: HandlerRegistry,
    context: HandlerContext,
}

/// Entry point for host events.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct XpRuntime {
    role: UserRole,
    events: EventBus,
    active: Option<Active>,
}

impl XpRuntime {
    /// Create a new runtime builder
    pub fn builder(config: XpConfig) -> XpRuntimeBuilder {
        XpRuntimeBuilder::new(config)
    }

    /// False when the configured game system has no XP scheme.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn system(&self) -> Option<GameSystem> {
        self.active.as_ref().map(|active| active.system)
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn processor(&self) -> Option<&EncounterProcessor> {
        self.active
            .as_ref()
            .map(|active| active.context.processor.as_ref())
    }

    pub fn banking(&self) -> Option<&BankingStore> {
        self.active.as_ref().map(|active| &active.context.banking)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to runtime events for a topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<XpEvent> {
        self.events.subscribe(topic)
    }

    /// Handles one host event.
    ///
    /// Clients without GM privilege and inert runtimes ignore every event. Returns
    /// the number of handlers that ran.
    pub async fn handle_event(&self, event: &HostEvent) -> Result<usize> {
        if !self.role.is_privileged() {
            trace!(
                target: "xp_runtime::runtime",
                role = %self.role,
                event = event.name(),
                "Ignoring event on unprivileged client"
            );
            return Ok(0);
        }

        let Some(active) = &self.active else {
            trace!(
                target: "xp_runtime::runtime",
                event = event.name(),
                "Runtime inert, ignoring event"
            );
            return Ok(0);
        };

        debug!(
            target: "xp_runtime::runtime",
            event = event.name(),
            encounter = %event.encounter(),
            "Handling host event"
        );
        active.registry.dispatch(event, &active.context).await
    }
}

/// Builder for [`XpRuntime`].
pub struct XpRuntimeBuilder {
    config: XpConfig,
    encounters: Option<Arc<dyn EncounterRepository>>,
    actors: Option<Arc<dyn ActorRepository>>,
    notifier: Option<Arc<dyn Notifier>>,
    handlers: Option<HandlerRegistry>,
}

impl XpRuntimeBuilder {
    fn new(config: XpConfig) -> Self {
        Self {
            config,
            encounters: None,
            actors: None,
            notifier: None,
            handlers: None,
        }
    }

    /// Set the encounter repository (required)
    pub fn encounters(mut self, repo: Arc<dyn EncounterRepository>) -> Self {
        self.encounters = Some(repo);
        self
    }

    /// Set the actor repository (required)
    pub fn actors(mut self, repo: Arc<dyn ActorRepository>) -> Self {
        self.actors = Some(repo);
        self
    }

    /// Set the notice sink.
    ///
    /// Defaults to the runtime's event bus, which republishes notices on
    /// [`Topic::Notice`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the default handler set.
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<XpRuntime> {
        let encounters = self.encounters.ok_or(RuntimeError::MissingRepository {
            kind: RepositoryKind::Encounter,
        })?;
        let actors = self.actors.ok_or(RuntimeError::MissingRepository {
            kind: RepositoryKind::Actor,
        })?;

        let config = self.config;
        let events = EventBus::with_capacity(config.event_buffer_size);

        let system = match GameSystem::detect(&config.system) {
            Ok(system) => system,
            Err(e) => {
                warn!(
                    target: "xp_runtime::runtime",
                    system = %config.system,
                    error = %e,
                    "Automatic XP disabled"
                );
                return Ok(XpRuntime {
                    role: config.role,
                    events,
                    active: None,
                });
            }
        };

        let strategy = XpStrategy::for_system(system, config.rounding, config.prefer_host_award);
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(events.clone()) as Arc<dyn Notifier>);

        info!(
            target: "xp_runtime::runtime",
            system = %system,
            strategy = strategy.name(),
            role = %config.role,
            "Automatic XP enabled"
        );

        let processor = EncounterProcessor::new(
            encounters.clone(),
            actors,
            strategy,
            notifier,
            events.clone(),
        )
        .with_chat_summary(config.chat_summary);

        let context = HandlerContext {
            processor: Arc::new(processor),
            banking: BankingStore::new(encounters, events.clone()),
        };

        Ok(XpRuntime {
            role: config.role,
            events,
            active: Some(Active {
                system,
                registry: self.handlers.unwrap_or_default(),
                context,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryActorRepository, InMemoryEncounterRepository};

    fn builder(config: XpConfig) -> XpRuntimeBuilder {
        XpRuntime::builder(config)
            .encounters(Arc::new(InMemoryEncounterRepository::new()))
            .actors(Arc::new(InMemoryActorRepository::new()))
    }

    #[test]
    fn test_missing_repository() {
        let result = XpRuntime::builder(XpConfig::default())
            .actors(Arc::new(InMemoryActorRepository::new()))
            .build();
        assert!(matches!(
            result,
            Err(RuntimeError::MissingRepository {
                kind: RepositoryKind::Encounter
            })
        ));
    }

    #[test]
    fn test_system_selects_strategy() {
        let runtime = builder(XpConfig::for_system("dnd5e")).build().unwrap();
        assert_eq!(runtime.system(), Some(GameSystem::Dnd5e));
        assert_eq!(runtime.processor().unwrap().strategy().name(), "total-xp");
    }

    #[tokio::test]
    async fn test_unknown_system_is_inert() {
        let runtime = builder(XpConfig::for_system("swade")).build().unwrap();
        assert!(!runtime.is_active());
        assert!(runtime.processor().is_none());

        let event = HostEvent::CombatComplete {
            encounter: "enc".into(),
        };
        assert_eq!(runtime.handle_event(&event).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unprivileged_role_ignores_events() {
        let config = XpConfig {
            role: UserRole::Player,
            ..XpConfig::default()
        };
        let runtime = builder(config).build().unwrap();
        assert!(runtime.is_active());

        let event = HostEvent::CombatComplete {
            encounter: "enc".into(),
        };
        assert_eq!(runtime.handle_event(&event).await.unwrap(), 0);
    }
}
