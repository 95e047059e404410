/// Text buffer: an index-addressed sequence of rows.
use std::fmt;

use anyhow::Result;

use crate::row::Row;

/// The open document as an ordered list of rows.
///
/// Always holds at least one row; the last row may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    rows: Vec<Row>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rows: text.split('\n').map(Row::from).collect(),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl TextBuffer {
    /// Creates a buffer holding one empty row.
    pub fn new() -> Self {
        Self {
            rows: vec![Row::new()],
        }
    }

    /// Builds a buffer from raw file bytes, one row per `\n`-separated line.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(String::from_utf8_lossy(bytes).as_ref())
    }

    /// Serializes the rows joined by `\n`, without a trailing newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Returns the number of rows. Never zero.
    pub fn len_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row at `row_idx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the row index is out of bounds.
    pub fn row(&self, row_idx: usize) -> Result<&Row> {
        match self.rows.get(row_idx) {
            Some(row) => Ok(row),
            None => anyhow::bail!(
                "row index {} out of bounds (buffer has {} rows)",
                row_idx,
                self.rows.len()
            ),
        }
    }

    fn row_mut(&mut self, row_idx: usize) -> Result<&mut Row> {
        let len = self.rows.len();
        match self.rows.get_mut(row_idx) {
            Some(row) => Ok(row),
            None => anyhow::bail!(
                "row index {} out of bounds (buffer has {} rows)",
                row_idx,
                len
            ),
        }
    }

    /// Returns the length of a row in chars.
    ///
    /// # Errors
    ///
    /// Returns an error if the row index is out of bounds.
    pub fn row_len(&self, row_idx: usize) -> Result<usize> {
        Ok(self.row(row_idx)?.len())
    }

    /// Inserts a single char into a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds or `ch` is a newline.
    pub fn insert_char(&mut self, row_idx: usize, col: usize, ch: char) -> Result<()> {
        self.row_mut(row_idx)?.insert(col, ch)
    }

    /// Inserts `text` into a row starting at `col`.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds or `text` contains a
    /// newline. The row is left untouched on error.
    pub fn insert_str(&mut self, row_idx: usize, col: usize, text: &str) -> Result<()> {
        if text.contains('\n') {
            anyhow::bail!("inserted text cannot contain a newline");
        }
        let row = self.row_mut(row_idx)?;
        if col > row.len() {
            anyhow::bail!(
                "insert column {} out of bounds (row has {} chars)",
                col,
                row.len()
            );
        }
        for (offset, ch) in text.chars().enumerate() {
            row.insert(col + offset, ch)?;
        }
        Ok(())
    }

    /// Removes and returns the char at `col` of a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds.
    pub fn erase_char(&mut self, row_idx: usize, col: usize) -> Result<char> {
        self.row_mut(row_idx)?.remove(col)
    }

    /// Splits a row at `col`; the tail becomes a new row right below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds.
    pub fn split_row(&mut self, row_idx: usize, col: usize) -> Result<()> {
        let tail = self.row_mut(row_idx)?.split_off(col)?;
        self.rows.insert(row_idx + 1, tail);
        Ok(())
    }

    /// Appends row `from` to the end of row `into`, then removes `from`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of bounds or both are equal.
    pub fn merge_row(&mut self, into: usize, from: usize) -> Result<()> {
        if into == from {
            anyhow::bail!("cannot merge row {} into itself", into);
        }
        self.row(into)?;
        self.row(from)?;
        let moved = self.rows.remove(from);
        let target = if from < into { into - 1 } else { into };
        self.rows[target].append(moved);
        Ok(())
    }

    /// Removes a row and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of bounds or it is the only row.
    pub fn remove_row(&mut self, row_idx: usize) -> Result<Row> {
        self.row(row_idx)?;
        if self.rows.len() == 1 {
            anyhow::bail!("cannot remove the only row");
        }
        Ok(self.rows.remove(row_idx))
    }
}
