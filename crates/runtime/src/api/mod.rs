//! Public API surface shared by every runtime layer.

pub mod errors;

pub use errors::{RepositoryKind, Result, RuntimeError};
