//! User-facing notifications.
//!
//! The host shows short toasts and can post chat messages. The processor emits
//! exactly one summary notice per award cycle, plus an optional chat entry.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A message for the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    /// Informational toast.
    Info(String),
    /// Toast that something needs the GM's attention.
    Warning(String),
    /// Chat log entry.
    Chat(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(message) | Notice::Warning(message) | Notice::Chat(message) => message,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::Warning(_))
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match &notice {
            Notice::Warning(message) => warn!(target: "xp_runtime::notify", "{}", message),
            Notice::Info(message) => info!(target: "xp_runtime::notify", "{}", message),
            Notice::Chat(message) => info!(target: "xp_runtime::notify", chat = true, "{}", message),
        }
    }
}
