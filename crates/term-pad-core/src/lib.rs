//! Buffer, cursor, viewport and undo engine of a terminal line editor.
//!
//! The crate owns the editing state and the per-keystroke pipeline. The
//! terminal itself and syntax coloring are reached through the `Surface`
//! and `Highlight` traits so they can be swapped for headless doubles.

pub mod buffer;
pub mod cursor;
pub mod document;
pub mod editor;
pub mod history;
pub mod input;
pub mod row;
pub mod surface;
pub mod viewport;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position};
pub use document::{Document, Redraw};
pub use editor::{Editor, Flow};
pub use input::{InputEvent, Key};
pub use row::Row;
pub use surface::{Cell, CellGrid, Color, Highlight, MemorySurface, PlainText, Surface};
pub use viewport::Viewport;
