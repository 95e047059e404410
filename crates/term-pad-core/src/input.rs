//! Input symbols delivered by a [`Surface`](crate::surface::Surface).

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Control chord, stored as the lowercase letter (`Ctrl('s')`).
    Ctrl(char),
    Enter,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

/// One event from the surface's input queue.
///
/// Resizes are their own event class so they never reach the edit pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { width: usize, height: usize },
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        InputEvent::Key(key)
    }
}
