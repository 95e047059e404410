//! File I/O operations for documents.
//!
//! Opening a path that does not exist creates it empty, so a new file can
//! be edited right away. Saving writes rows joined by `\n` with no trailing
//! newline.

use std::path::Path;

use anyhow::{Context, Result};
use term_pad_config::AppConfig;

use crate::buffer::TextBuffer;

use super::Document;

/// Reads a whole file, creating an empty one if it is absent.
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "file not found, creating it empty");
        std::fs::write(path, b"")
            .with_context(|| format!("failed to create file: {}", path.display()))?;
        return Ok(Vec::new());
    }
    std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Replaces the contents of a file.
pub fn write_all(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

fn title_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

impl Document {
    /// Opens a document from a file path with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_config(path, &AppConfig::default())
    }

    /// Opens a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created.
    pub fn open_with_config(path: &Path, config: &AppConfig) -> Result<Self> {
        let bytes = read_all(path)?;
        let buffer = TextBuffer::from_bytes(&bytes);
        tracing::info!(
            path = %path.display(),
            rows = buffer.len_rows(),
            "opened document"
        );

        let mut doc = Self::from_buffer(buffer, config);
        doc.file_path = Some(path.to_path_buf());
        doc.title = title_for(path);
        Ok(doc)
    }

    /// Saves the document to its file path.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is set or the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .file_path
            .as_ref()
            .context("no file path set for this document")?
            .clone();
        self.save_to(&path)
    }

    /// Saves the document to a specific path, which becomes its file path.
    ///
    /// The buffer is left untouched when the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        write_all(path, &self.buffer.to_bytes())?;

        self.file_path = Some(path.to_path_buf());
        self.title = title_for(path);
        self.modified = false;
        self.last_saved_at = Some(chrono::Local::now());
        // Typing after a save is a new undo step
        self.history.force_group_break();
        tracing::info!(path = %path.display(), "saved document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Position;

    #[test]
    fn test_open_reads_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "ab\ncd").unwrap();

        let doc = Document::open(&path).unwrap();
        assert_eq!(doc.buffer.len_rows(), 2);
        assert_eq!(doc.title, "notes.txt");
        assert_eq!(doc.file_path.as_deref(), Some(path.as_path()));
        assert!(!doc.modified);
        assert_eq!(doc.cursor.position, Position::new(0, 0));
    }

    #[test]
    fn test_open_missing_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");

        let doc = Document::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"");
        assert_eq!(doc.buffer.len_rows(), 1);
        assert_eq!(doc.buffer.row_len(0).unwrap(), 0);
    }

    #[test]
    fn test_open_unreachable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("file.txt");
        let err = Document::open(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create file"));
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.txt");
        std::fs::write(&path, "one\ntwo").unwrap();

        let mut doc = Document::open(&path).unwrap();
        doc.insert_char('x');
        assert!(doc.modified);
        doc.save().unwrap();
        assert!(!doc.modified);
        assert!(doc.last_saved_at.is_some());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xone\ntwo");

        let reopened = Document::open(&path).unwrap();
        assert_eq!(reopened.buffer, doc.buffer);
    }

    #[test]
    fn test_save_no_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nl.txt");
        let mut doc = Document::open(&path).unwrap();
        doc.insert_char('a');
        doc.newline();
        doc.insert_char('b');
        doc.save().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a\nb");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::new();
        doc.insert_char('a');
        assert!(doc.save().is_err());
        assert!(doc.modified);
    }

    #[test]
    fn test_save_failure_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new();
        doc.insert_char('z');
        let before = doc.buffer.clone();

        // A directory cannot be written as a file
        assert!(doc.save_to(dir.path()).is_err());
        assert_eq!(doc.buffer, before);
        assert!(doc.modified);
        assert!(doc.file_path.is_none());
    }

    #[test]
    fn test_save_breaks_typing_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.txt");
        let mut doc = Document::open(&path).unwrap();
        doc.insert_char('a');
        doc.save().unwrap();
        doc.insert_char('b');

        doc.undo();
        assert_eq!(doc.buffer.to_string(), "a");
        doc.undo();
        assert_eq!(doc.buffer.to_string(), "");
    }

    #[test]
    fn test_save_to_updates_path_and_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renamed.md");
        let mut doc = Document::new();
        doc.save_to(&path).unwrap();
        assert_eq!(doc.title, "renamed.md");
        assert_eq!(doc.file_path.as_deref(), Some(path.as_path()));
    }
}
