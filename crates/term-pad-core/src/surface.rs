//! Rendering surface and highlighting seams.
//!
//! The editor draws into a [`Surface`]: a grid of colored cells with a
//! cursor and a blocking input queue. [`CellGrid`] is the in-memory cell
//! store shared by the terminal implementation and [`MemorySurface`], the
//! headless surface used for tests and scripted sessions.

use std::collections::VecDeque;

use anyhow::Result;

use crate::input::InputEvent;

/// Foreground colors a surface can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// One screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: Color::Default,
        }
    }
}

/// Terminal-like output and input capability consumed by the editor.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Returns the char at a cell, or `' '` outside the grid.
    fn get(&self, x: usize, y: usize) -> char;
    /// Writes a cell. Writes outside the grid are dropped.
    fn set(&mut self, x: usize, y: usize, ch: char, color: Color);
    fn set_cursor(&mut self, x: usize, y: usize);
    /// Blanks every cell.
    fn clear(&mut self);
    /// Pushes pending cell changes to the display.
    fn present(&mut self) -> Result<()>;
    /// Presents after the display was resized.
    fn present_after_resize(&mut self) -> Result<()>;
    /// Blocks until the next input event.
    fn get_input(&mut self) -> Result<InputEvent>;

    /// Changes the color of a cell, keeping its char.
    fn recolor(&mut self, x: usize, y: usize, color: Color) {
        let ch = self.get(x, y);
        self.set(x, y, ch, color);
    }
}

/// Recolors on-screen text after a repaint.
///
/// Implementations only inspect and recolor cells of screen rows
/// `[start_row, end_row)`; they never touch buffer state.
pub trait Highlight {
    fn recolor(&self, surface: &mut dyn Surface, start_row: usize, end_row: usize);
}

/// Highlighter that leaves every cell in the default color.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Highlight for PlainText {
    fn recolor(&self, _surface: &mut dyn Surface, _start_row: usize, _end_row: usize) {}
}

/// Fixed-size grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes the grid. All cells are blanked.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width * height];
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Writes a cell, ignoring coordinates outside the grid.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Returns one screen row.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Returns the text of one screen row with trailing blanks trimmed.
    pub fn row_text(&self, y: usize) -> String {
        let text: String = self.row(y).iter().map(|c| c.ch).collect();
        text.trim_end().to_string()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

/// Headless surface with a scripted input queue.
///
/// A `Resize` event resizes the grid when it is read, the way a terminal
/// has already changed size by the time the event arrives.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    grid: CellGrid,
    cursor: (usize, usize),
    inputs: VecDeque<InputEvent>,
    presents: usize,
}

impl MemorySurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: CellGrid::new(width, height),
            cursor: (0, 0),
            inputs: VecDeque::new(),
            presents: 0,
        }
    }

    /// Queues input events to be returned by `get_input`.
    pub fn feed<I>(&mut self, events: I)
    where
        I: IntoIterator,
        I::Item: Into<InputEvent>,
    {
        self.inputs.extend(events.into_iter().map(Into::into));
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Last position passed to `set_cursor`.
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Number of `present`/`present_after_resize` calls so far.
    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn row_text(&self, y: usize) -> String {
        self.grid.row_text(y)
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> usize {
        self.grid.width()
    }

    fn height(&self) -> usize {
        self.grid.height()
    }

    fn get(&self, x: usize, y: usize) -> char {
        self.grid.get(x, y).map(|c| c.ch).unwrap_or(' ')
    }

    fn set(&mut self, x: usize, y: usize, ch: char, color: Color) {
        self.grid.set(x, y, Cell { ch, color });
    }

    fn set_cursor(&mut self, x: usize, y: usize) {
        self.cursor = (x, y);
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }

    fn present_after_resize(&mut self) -> Result<()> {
        self.present()
    }

    fn get_input(&mut self) -> Result<InputEvent> {
        let Some(event) = self.inputs.pop_front() else {
            anyhow::bail!("scripted input exhausted");
        };
        if let InputEvent::Resize { width, height } = event {
            self.grid.resize(width, height);
        }
        Ok(event)
    }
}
