// Re-exports from term-pad-mod-history.
pub use term_pad_mod_history::{Command, CommandKind, HistoryConfig, UndoLog};
