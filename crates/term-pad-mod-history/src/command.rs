/// Recorded editor actions and their inverses.

/// A single reversible user action.
///
/// Each variant carries just enough payload to be inverted. Text payloads
/// never contain a newline: row splits and joins are their own variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Characters inserted left of the cursor; the cursor ends after them.
    Insert(String),
    /// Characters erased left of the cursor (backspace), in document order.
    Delete(String),
    /// Enter: the row is split at the cursor, cursor moves to the new row.
    SplitRow,
    /// Backspace at the start of a row: the row is merged into the previous one.
    JoinRow,
    MoveLeft,
    MoveRight,
    /// Up, with the column before and after the clamp to the target row.
    MoveUp { from_col: usize, to_col: usize },
    /// Down, with the column before and after the clamp to the target row.
    MoveDown { from_col: usize, to_col: usize },
}

/// Discriminant of a [`Command`], used for run coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Insert,
    Delete,
    SplitRow,
    JoinRow,
    Move,
}

impl Command {
    /// Returns the command that undoes this one.
    pub fn invert(&self) -> Command {
        match self {
            Command::Insert(text) => Command::Delete(text.clone()),
            Command::Delete(text) => Command::Insert(text.clone()),
            Command::SplitRow => Command::JoinRow,
            Command::JoinRow => Command::SplitRow,
            Command::MoveLeft => Command::MoveRight,
            Command::MoveRight => Command::MoveLeft,
            Command::MoveUp { from_col, to_col } => Command::MoveDown {
                from_col: *to_col,
                to_col: *from_col,
            },
            Command::MoveDown { from_col, to_col } => Command::MoveUp {
                from_col: *to_col,
                to_col: *from_col,
            },
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Insert(_) => CommandKind::Insert,
            Command::Delete(_) => CommandKind::Delete,
            Command::SplitRow => CommandKind::SplitRow,
            Command::JoinRow => CommandKind::JoinRow,
            Command::MoveLeft
            | Command::MoveRight
            | Command::MoveUp { .. }
            | Command::MoveDown { .. } => CommandKind::Move,
        }
    }

    /// Whether applying this command changes buffer content.
    pub fn is_edit(&self) -> bool {
        !matches!(self.kind(), CommandKind::Move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_text_commands() {
        assert_eq!(
            Command::Insert("abc".to_string()).invert(),
            Command::Delete("abc".to_string())
        );
        assert_eq!(
            Command::Delete("x".to_string()).invert(),
            Command::Insert("x".to_string())
        );
    }

    #[test]
    fn test_invert_structural_commands() {
        assert_eq!(Command::SplitRow.invert(), Command::JoinRow);
        assert_eq!(Command::JoinRow.invert(), Command::SplitRow);
    }

    #[test]
    fn test_invert_horizontal_moves() {
        assert_eq!(Command::MoveLeft.invert(), Command::MoveRight);
        assert_eq!(Command::MoveRight.invert(), Command::MoveLeft);
    }

    #[test]
    fn test_invert_vertical_moves_swap_columns() {
        let up = Command::MoveUp {
            from_col: 7,
            to_col: 2,
        };
        assert_eq!(
            up.invert(),
            Command::MoveDown {
                from_col: 2,
                to_col: 7
            }
        );
    }

    #[test]
    fn test_invert_is_involution() {
        let commands = [
            Command::Insert("hi".to_string()),
            Command::Delete("yo".to_string()),
            Command::SplitRow,
            Command::JoinRow,
            Command::MoveLeft,
            Command::MoveRight,
            Command::MoveUp {
                from_col: 1,
                to_col: 0,
            },
            Command::MoveDown {
                from_col: 4,
                to_col: 4,
            },
        ];
        for cmd in &commands {
            assert_eq!(&cmd.invert().invert(), cmd);
        }
    }

    #[test]
    fn test_kind_and_is_edit() {
        assert_eq!(Command::Insert(String::new()).kind(), CommandKind::Insert);
        assert!(Command::JoinRow.is_edit());
        assert!(!Command::MoveLeft.is_edit());
        assert!(!Command::MoveDown {
            from_col: 0,
            to_col: 0
        }
        .is_edit());
    }
}
