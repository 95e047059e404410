/// A single line of text, stored as a vector of chars.
use std::fmt;

use anyhow::Result;

/// One row of the document. Never contains a newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<char>,
}

impl From<&str> for Row {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Returns the row length in chars.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns the char at `col`.
    ///
    /// # Errors
    ///
    /// Returns an error if `col` is past the last char.
    pub fn char_at(&self, col: usize) -> Result<char> {
        match self.chars.get(col) {
            Some(ch) => Ok(*ch),
            None => anyhow::bail!(
                "column {} out of bounds (row has {} chars)",
                col,
                self.chars.len()
            ),
        }
    }

    /// Inserts `ch` before column `col`.
    ///
    /// # Errors
    ///
    /// Returns an error if `col` is past the row end or `ch` is a newline.
    pub fn insert(&mut self, col: usize, ch: char) -> Result<()> {
        if ch == '\n' {
            anyhow::bail!("rows cannot hold a newline");
        }
        if col > self.chars.len() {
            anyhow::bail!(
                "insert column {} out of bounds (row has {} chars)",
                col,
                self.chars.len()
            );
        }
        self.chars.insert(col, ch);
        Ok(())
    }

    /// Removes and returns the char at `col`.
    ///
    /// # Errors
    ///
    /// Returns an error if `col` is past the last char.
    pub fn remove(&mut self, col: usize) -> Result<char> {
        if col >= self.chars.len() {
            anyhow::bail!(
                "erase column {} out of bounds (row has {} chars)",
                col,
                self.chars.len()
            );
        }
        Ok(self.chars.remove(col))
    }

    /// Splits the row at `col`, keeping `[0, col)` and returning the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if `col` is past the row end.
    pub fn split_off(&mut self, col: usize) -> Result<Row> {
        if col > self.chars.len() {
            anyhow::bail!(
                "split column {} out of bounds (row has {} chars)",
                col,
                self.chars.len()
            );
        }
        Ok(Row {
            chars: self.chars.split_off(col),
        })
    }

    /// Appends all chars of `other` to the end of this row.
    pub fn append(&mut self, mut other: Row) {
        self.chars.append(&mut other.chars);
    }
}
