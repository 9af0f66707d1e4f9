//! Host events in, XP events out.
//!
//! [`HostEvent`] is what the host delivers to the runtime. [`EventBus`] is a
//! topic-based broadcast of what the runtime did, so host glue can subscribe to
//! notices or award results without polling.

mod bus;
mod types;

pub use bus::{EventBus, Topic, XpEvent};
pub use types::{EncounterChange, HostEvent};
