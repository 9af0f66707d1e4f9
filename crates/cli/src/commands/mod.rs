//! Command implementations

mod replay;
mod table;

pub use replay::Replay;
pub use table::Table;
