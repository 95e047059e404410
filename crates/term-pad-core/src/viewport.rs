/// Scrolling window over the buffer rows.
use std::ops::Range;

use crate::buffer::TextBuffer;
use crate::cursor::Cursor;

/// Maps buffer rows to screen rows through a single top-visible-row offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    width: usize,
    height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Viewport {
    /// Creates a viewport at the top of the buffer. Dimensions are floored at 1.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            top: 0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Index of the first visible buffer row.
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Buffer rows currently on screen.
    pub fn visible_rows(&self, buffer: &TextBuffer) -> Range<usize> {
        let end = (self.top + self.height).min(buffer.len_rows());
        self.top.min(end)..end
    }

    /// Scrolls so the cursor's screen row is back inside `[0, height)`.
    ///
    /// Called right after any operation that may change the cursor's row.
    /// Returns `true` if the window moved, meaning a full repaint is due.
    pub fn follow(&mut self, cursor: &mut Cursor, buffer: &TextBuffer) -> bool {
        let row = cursor.position.row;
        if cursor.y < 0 {
            // Cursor went above the window
            self.top = row;
            cursor.y = 0;
            tracing::trace!(top = self.top, "scroll up");
            return true;
        }
        if cursor.y >= self.height as isize && row < buffer.len_rows() {
            // Cursor went below the window
            self.top = row + 1 - self.height;
            cursor.y = self.height as isize - 1;
            tracing::trace!(top = self.top, "scroll down");
            return true;
        }
        false
    }

    /// Applies new screen dimensions, keeping the top row when the cursor
    /// still fits and otherwise scrolling just enough to keep it visible.
    pub fn resize(&mut self, width: usize, height: usize, cursor: &mut Cursor) {
        self.width = width.max(1);
        self.height = height.max(1);
        let row = cursor.position.row;
        if row < self.top {
            self.top = row;
        } else if row >= self.top + self.height {
            self.top = row + 1 - self.height;
        }
        cursor.y = row as isize - self.top as isize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Position;

    fn numbered(rows: usize) -> TextBuffer {
        let text: Vec<String> = (0..rows).map(|i| format!("row {i}")).collect();
        TextBuffer::from(text.join("\n").as_str())
    }

    fn assert_in_sync(cursor: &Cursor, viewport: &Viewport) {
        assert_eq!(
            cursor.y,
            cursor.position.row as isize - viewport.top() as isize
        );
        assert!(cursor.y >= 0 && cursor.y < viewport.height() as isize);
        assert_eq!(cursor.x, cursor.position.col);
    }

    #[test]
    fn test_no_scroll_inside_window() {
        let buf = numbered(10);
        let mut vp = Viewport::new(80, 5);
        let mut cursor = Cursor::new();
        cursor.move_down(&buf);
        assert!(!vp.follow(&mut cursor, &buf));
        assert_eq!(vp.top(), 0);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_scroll_down_one_row() {
        let buf = numbered(10);
        let mut vp = Viewport::new(80, 3);
        let mut cursor = Cursor::new();
        for _ in 0..3 {
            cursor.move_down(&buf);
            vp.follow(&mut cursor, &buf);
        }
        assert_eq!(vp.top(), 1);
        assert_eq!(cursor.y, 2);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_scroll_up_one_row() {
        let buf = numbered(10);
        let mut vp = Viewport::new(80, 3);
        let mut cursor = Cursor::new();
        for _ in 0..5 {
            cursor.move_down(&buf);
            vp.follow(&mut cursor, &buf);
        }
        assert_eq!(vp.top(), 3);

        for _ in 0..2 {
            cursor.move_up(&buf);
            assert!(!vp.follow(&mut cursor, &buf));
        }
        cursor.move_up(&buf);
        assert_eq!(cursor.y, -1);
        assert!(vp.follow(&mut cursor, &buf));
        assert_eq!(vp.top(), 2);
        assert_eq!(cursor.y, 0);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_no_scroll_past_last_row() {
        let buf = numbered(3);
        let mut vp = Viewport::new(80, 3);
        let mut cursor = Cursor::new();
        for _ in 0..10 {
            cursor.move_down(&buf);
            vp.follow(&mut cursor, &buf);
        }
        assert_eq!(vp.top(), 0);
        assert_eq!(cursor.position.row, 2);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_visible_rows() {
        let buf = numbered(10);
        let mut vp = Viewport::new(80, 4);
        assert_eq!(vp.visible_rows(&buf), 0..4);

        let mut cursor = Cursor::new();
        cursor.place(Position::new(9, 0), 0, &buf);
        vp.follow(&mut cursor, &buf);
        assert_eq!(vp.visible_rows(&buf), 6..10);
    }

    #[test]
    fn test_visible_rows_short_buffer() {
        let buf = numbered(2);
        let vp = Viewport::new(80, 10);
        assert_eq!(vp.visible_rows(&buf), 0..2);
    }

    #[test]
    fn test_follow_handles_jumps() {
        let buf = numbered(50);
        let mut vp = Viewport::new(80, 5);
        let mut cursor = Cursor::new();
        cursor.place(Position::new(30, 0), vp.top(), &buf);
        assert!(vp.follow(&mut cursor, &buf));
        assert_eq!(vp.top(), 26);
        assert_in_sync(&cursor, &vp);

        cursor.place(Position::new(2, 0), vp.top(), &buf);
        assert!(vp.follow(&mut cursor, &buf));
        assert_eq!(vp.top(), 2);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_resize_shrink_keeps_cursor_visible() {
        let buf = numbered(20);
        let mut vp = Viewport::new(80, 10);
        let mut cursor = Cursor::new();
        cursor.place(Position::new(8, 0), 0, &buf);
        vp.resize(40, 4, &mut cursor);
        assert_eq!(vp.width(), 40);
        assert_eq!(vp.top(), 5);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_resize_grow_keeps_top() {
        let buf = numbered(20);
        let mut vp = Viewport::new(80, 3);
        let mut cursor = Cursor::new();
        cursor.place(Position::new(6, 0), 0, &buf);
        vp.follow(&mut cursor, &buf);
        assert_eq!(vp.top(), 4);

        vp.resize(80, 10, &mut cursor);
        assert_eq!(vp.top(), 4);
        assert_in_sync(&cursor, &vp);
    }

    #[test]
    fn test_dimensions_floor_at_one() {
        let vp = Viewport::new(0, 0);
        assert_eq!((vp.width(), vp.height()), (1, 1));
    }
}
