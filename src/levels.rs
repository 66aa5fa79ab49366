use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::board::{Board, BoardError};

#[derive(Debug, Error)]
pub enum LevelError {
    /// IO error when reading from file
    #[error("failed to read levels file: {0}")]
    Io(#[from] io::Error),
    /// A level failed board validation (1-indexed)
    #[error("level {index}: {source}")]
    InvalidLevel { index: usize, source: BoardError },
    /// The input contained no levels at all
    #[error("no levels found")]
    Empty,
    /// A requested level index does not exist (0-indexed)
    #[error("level index {0} does not exist")]
    NoSuchLevel(usize),
}

/// An ordered collection of boards loaded from level text.
///
/// The text format is ASCII rows of the level alphabet, whitespace trimmed
/// per line, with a blank line separating consecutive levels. Every level is
/// validated through [`Board::from_rows`] at load time.
#[derive(Debug)]
pub struct Levels {
    levels: Vec<Board>,
}

impl Levels {
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        let mut rows: Vec<String> = Vec::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                if !rows.is_empty() {
                    Self::push_level(&mut levels, std::mem::take(&mut rows))?;
                }
                continue;
            }
            rows.push(line.to_string());
        }

        // The last level may not be followed by a blank line.
        if !rows.is_empty() {
            Self::push_level(&mut levels, rows)?;
        }

        Ok(Levels { levels })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    fn push_level(levels: &mut Vec<Board>, rows: Vec<String>) -> Result<(), LevelError> {
        let board = Board::from_rows(rows).map_err(|source| LevelError::InvalidLevel {
            index: levels.len() + 1,
            source,
        })?;
        levels.push(board);
        Ok(())
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let contents = "wwww\nwjbg\nwwww\n\njbgf\n\n  jbg  \n";
        let levels = Levels::from_text(contents).unwrap();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels.get(0).unwrap().bounds(), (4, 3));
        assert_eq!(levels.get(1).unwrap().bounds(), (4, 1));
        // Per-line whitespace is trimmed.
        assert_eq!(levels.get(2).unwrap().bounds(), (3, 1));
        assert!(levels.get(3).is_none());
    }

    #[test]
    fn test_from_text_no_trailing_blank_line() {
        let levels = Levels::from_text("jbgf\n\njbgf").unwrap();
        assert_eq!(levels.len(), 2);
    }

    #[test]
    fn test_from_text_empty() {
        let levels = Levels::from_text("\n\n").unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn test_from_text_invalid_level() {
        // Second level has no player.
        let result = Levels::from_text("jbgf\n\nwbgf\n");
        match result {
            Err(LevelError::InvalidLevel { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected InvalidLevel, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Levels::from_file("nonexistent_levels.txt");
        assert!(matches!(result, Err(LevelError::Io(_))));
    }
}
