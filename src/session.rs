use log::info;

use crate::board::{Board, Direction};
use crate::levels::{LevelError, Levels};

/// What a move did to the overall play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Play continues on the current level (whether or not the move landed).
    Playing,
    /// The move solved the current level; `next` is now active (0-indexed).
    Advanced { next: usize },
    /// The move solved the final level; the session is over.
    Complete,
}

/// One play-through of a level set.
///
/// Owns the level cursor and the active board, so callers hold a single
/// context object instead of threading level state themselves. The board is
/// cloned fresh from the level set on every advance.
#[derive(Debug)]
pub struct Session {
    levels: Levels,
    current: usize,
    board: Board,
    finished: bool,
}

impl Session {
    /// Start a session at the given level (0-indexed).
    pub fn new(levels: Levels, start: usize) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        let board = levels.get(start).ok_or(LevelError::NoSuchLevel(start))?.clone();
        Ok(Session {
            levels,
            current: start,
            board,
            finished: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Index of the active level (0-indexed).
    pub fn level(&self) -> usize {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply one directional move and advance to the next level if the move
    /// solved the current one. After the final level is solved, further moves
    /// are no-ops reporting [`Outcome::Complete`].
    pub fn move_player(&mut self, dir: Direction) -> Outcome {
        if self.finished {
            return Outcome::Complete;
        }

        self.board.move_player(dir);
        if !self.board.is_victory() {
            return Outcome::Playing;
        }

        info!("level {} solved", self.current + 1);
        match self.levels.get(self.current + 1) {
            Some(next_board) => {
                self.current += 1;
                self.board = next_board.clone();
                Outcome::Advanced { next: self.current }
            }
            None => {
                self.finished = true;
                Outcome::Complete
            }
        }
    }

    /// Restart the current level. The level cursor is unchanged.
    pub fn reset(&mut self) {
        self.board.reset();
    }
}
