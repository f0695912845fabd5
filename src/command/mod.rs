mod commands;
pub mod history;
mod reducer;

pub use commands::Command;
pub use history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use reducer::reduce;
