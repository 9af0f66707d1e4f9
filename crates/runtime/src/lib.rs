//! Event-driven XP distribution for combat encounters.
//!
//! This crate wires the pure rules from `xp-core` to the host application:
//! repositories for encounter and actor records, a banking store for creatures
//! removed mid-combat, the encounter processor that awards XP exactly once, and
//! the handlers that react to host events. Consumers build an [`XpRuntime`]
//! and feed it [`HostEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the builder and the event entry point
//! - [`api`] exposes error types shared by every layer
//! - [`events`] defines inbound host events and the outbound event bus
//! - [`handlers`] routes host events to banking and award processing
//! - [`processor`] and [`banking`] implement the award cycle
//! - [`repository`] and [`notify`] are the collaborator seams to the host
//! - [`config`] reads runtime settings from the environment
pub mod api;
pub mod banking;
pub mod config;
pub mod events;
pub mod handlers;
pub mod notify;
pub mod processor;
pub mod repository;
pub mod runtime;

pub use api::{RepositoryKind, Result, RuntimeError};
pub use banking::BankingStore;
pub use config::{UserRole, XpConfig};
pub use events::{EncounterChange, EventBus, HostEvent, Topic, XpEvent};
pub use handlers::{
    AwardHandler, BankingHandler, EventHandler, HandlerContext, HandlerCriticality,
    HandlerRegistry,
};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use processor::{
    AwardReport, AwardTrigger, EncounterProcessor, PlayerAward, PlayerFailure, ProcessOutcome,
    ProcessingGuard, ProcessingLocks,
};
pub use repository::{
    ActorRepository, EncounterFlag, EncounterRepository, InMemoryActorRepository,
    InMemoryEncounterRepository, RepositoryError,
};
pub use runtime::{XpRuntime, XpRuntimeBuilder};
