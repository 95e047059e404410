/// Cursor model: a buffer position plus its screen coordinates.
use crate::buffer::TextBuffer;

/// Represents a position in the text as row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 0-indexed row number.
    pub row: usize,
    /// 0-indexed column (char offset within the row).
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

/// The insertion cursor.
///
/// `x` always equals `position.col`. `y` is the screen row and moves in
/// lock-step with `position.row`; it may briefly sit at `-1` or at the
/// viewport height after a row change until the viewport scrolls it back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Current buffer position.
    pub position: Position,
    /// Screen column.
    pub x: usize,
    /// Screen row, relative to the top visible row.
    pub y: isize,
}

impl Cursor {
    /// Creates a new cursor at position (0, 0), top-left of the screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the cursor at `pos` and derives its screen row from `top`.
    ///
    /// The position is clamped to buffer bounds.
    pub fn place(&mut self, pos: Position, top: usize, buffer: &TextBuffer) {
        let row = pos.row.min(buffer.len_rows() - 1);
        let col = pos.col.min(buffer.row_len(row).unwrap_or(0));
        self.position = Position::new(row, col);
        self.x = col;
        self.y = row as isize - top as isize;
    }

    /// Moves the cursor right by one character, wrapping to the start of
    /// the next row. Returns `false` at the end of the buffer.
    pub fn move_right(&mut self, buffer: &TextBuffer) -> bool {
        let row_len = buffer.row_len(self.position.row).unwrap_or(0);
        if self.position.col < row_len {
            self.set_col(self.position.col + 1);
            true
        } else if self.position.row + 1 < buffer.len_rows() {
            self.go_to_row(self.position.row + 1, 0);
            true
        } else {
            false
        }
    }

    /// Moves the cursor left by one character, wrapping to the end of the
    /// previous row. Returns `false` at the start of the buffer.
    pub fn move_left(&mut self, buffer: &TextBuffer) -> bool {
        if self.position.col > 0 {
            self.set_col(self.position.col - 1);
            true
        } else if self.position.row > 0 {
            let prev_len = buffer.row_len(self.position.row - 1).unwrap_or(0);
            self.go_to_row(self.position.row - 1, prev_len);
            true
        } else {
            false
        }
    }

    /// Moves the cursor up one row, keeping the column when the target row
    /// is long enough. Returns `false` on the first row.
    pub fn move_up(&mut self, buffer: &TextBuffer) -> bool {
        self.move_up_to(self.position.col, buffer)
    }

    /// Moves the cursor up one row, landing on `col` clamped to the row length.
    pub fn move_up_to(&mut self, col: usize, buffer: &TextBuffer) -> bool {
        if self.position.row == 0 {
            return false;
        }
        let target = self.position.row - 1;
        let row_len = buffer.row_len(target).unwrap_or(0);
        self.go_to_row(target, col.min(row_len));
        true
    }

    /// Moves the cursor down one row, keeping the column when the target row
    /// is long enough. Returns `false` on the last row.
    pub fn move_down(&mut self, buffer: &TextBuffer) -> bool {
        self.move_down_to(self.position.col, buffer)
    }

    /// Moves the cursor down one row, landing on `col` clamped to the row length.
    pub fn move_down_to(&mut self, col: usize, buffer: &TextBuffer) -> bool {
        if self.position.row + 1 >= buffer.len_rows() {
            return false;
        }
        let target = self.position.row + 1;
        let row_len = buffer.row_len(target).unwrap_or(0);
        self.go_to_row(target, col.min(row_len));
        true
    }

    /// Advances the column after `n` chars were inserted at the cursor.
    pub fn advance(&mut self, n: usize) {
        self.set_col(self.position.col + n);
    }

    /// Retreats the column after `n` chars left of the cursor were erased.
    pub fn retreat(&mut self, n: usize) {
        self.set_col(self.position.col.saturating_sub(n));
    }

    /// Moves to `col` on another row, shifting the screen row by the same
    /// number of rows.
    pub fn go_to_row(&mut self, row: usize, col: usize) {
        self.y += row as isize - self.position.row as isize;
        self.position = Position::new(row, col);
        self.x = col;
    }

    fn set_col(&mut self, col: usize) {
        self.position.col = col;
        self.x = col;
    }
}
