/// Undo/redo history for a single editing session.
///
/// Provides the `Command` model (every recorded user action knows its own
/// inverse) and an `UndoLog` that coalesces typing bursts into single undo
/// steps and keeps a read cursor so undone commands can be redone.
pub mod command;
pub mod config;
pub mod undo_log;

pub use command::{Command, CommandKind};
pub use config::HistoryConfig;
pub use undo_log::UndoLog;
