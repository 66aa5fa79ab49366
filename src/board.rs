use std::fmt;

use log::debug;
use thiserror::Error;

use crate::tile::{Facing, Occupant, Terrain, Tile};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The level description is empty, ragged, uses an unknown symbol, or
    /// does not contain exactly one player.
    #[error("malformed level: {0}")]
    MalformedLevel(String),
    /// A query or move referenced a position outside the grid.
    #[error("position is outside the board")]
    IndexOutOfRange,
    /// Attempted to push a cell that holds no movable occupant.
    #[error("element cannot be moved")]
    NotMovable,
    /// Attempted to remove terrain or a seated block.
    #[error("element cannot be removed")]
    NotRemovable,
    /// The push chain ran into a wall or a seated block.
    #[error("push is blocked")]
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    fn facing(self) -> Facing {
        match self {
            Direction::Up => Facing::Up,
            Direction::Down => Facing::Down,
            Direction::Left => Facing::Left,
            Direction::Right => Facing::Right,
        }
    }
}

/// One grid position: permanent terrain plus an optional occupant layered on
/// top of it. The visible symbol is the occupant when present, the terrain
/// otherwise, so vacating a cell reveals what was underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    terrain: Terrain,
    occupant: Option<Occupant>,
}

impl Cell {
    fn from_char(ch: char) -> Option<Cell> {
        let cell = match Tile::from_char(ch)? {
            Tile::Wall => Cell {
                terrain: Terrain::Wall,
                occupant: None,
            },
            Tile::Floor => Cell {
                terrain: Terrain::Floor,
                occupant: None,
            },
            Tile::Goal => Cell {
                terrain: Terrain::Goal,
                occupant: None,
            },
            Tile::Block => Cell {
                terrain: Terrain::Floor,
                occupant: Some(Occupant::Block),
            },
            Tile::BlockOnGoal => Cell {
                terrain: Terrain::Goal,
                occupant: Some(Occupant::SeatedBlock),
            },
            Tile::Player(facing) => Cell {
                terrain: Terrain::Floor,
                occupant: Some(Occupant::Player(facing)),
            },
        };
        Some(cell)
    }

    fn top(&self) -> Tile {
        match self.occupant {
            Some(Occupant::Block) => Tile::Block,
            Some(Occupant::SeatedBlock) => Tile::BlockOnGoal,
            Some(Occupant::Player(facing)) => Tile::Player(facing),
            None => match self.terrain {
                Terrain::Wall => Tile::Wall,
                Terrain::Floor => Tile::Floor,
                Terrain::Goal => Tile::Goal,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // Original level rows, kept for reset().
    source: Vec<String>,
    // Row-major, width * height.
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    player: (usize, usize),
    goals_left: usize,
}

impl Board {
    /// Build a board from rows of the level alphabet (see [`Tile::from_char`]).
    ///
    /// The input must be rectangular, non-empty, and contain exactly one
    /// player symbol; anything else fails with `MalformedLevel`.
    pub fn from_rows(rows: Vec<String>) -> Result<Self, BoardError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(BoardError::MalformedLevel("empty level".to_string()));
        }

        let width = rows[0].chars().count();
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        let mut player = None;
        let mut goals_left = 0;

        for (row, line) in rows.iter().enumerate() {
            let cols = line.chars().count();
            if cols != width {
                return Err(BoardError::MalformedLevel(format!(
                    "row {} has {} columns, expected {}",
                    row, cols, width
                )));
            }

            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| {
                    BoardError::MalformedLevel(format!(
                        "invalid character '{}' at position ({}, {})",
                        ch, row, col
                    ))
                })?;

                if cell.occupant.is_some_and(Occupant::is_player) {
                    if player.is_some() {
                        return Err(BoardError::MalformedLevel(
                            "multiple players found".to_string(),
                        ));
                    }
                    player = Some((row, col));
                }
                if cell.terrain == Terrain::Goal && cell.occupant.is_none() {
                    goals_left += 1;
                }

                cells.push(cell);
            }
        }

        let player =
            player.ok_or_else(|| BoardError::MalformedLevel("no player found".to_string()))?;

        Ok(Board {
            source: rows,
            cells,
            width,
            height,
            player,
            goals_left,
        })
    }

    /// Build a board from level text, one row per line, trimming surrounding
    /// whitespace per line.
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        Self::from_rows(text.lines().map(|line| line.trim().to_string()).collect())
    }

    /// Restore the initial layout, player position, and goal counter.
    pub fn reset(&mut self) {
        let source = std::mem::take(&mut self.source);
        *self = Self::from_rows(source).expect("source rows were validated at construction");
    }

    /// Returns (width, height). Fixed after construction.
    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True iff every goal is covered by a seated block.
    pub fn is_victory(&self) -> bool {
        self.goals_left == 0
    }

    /// Number of goals not yet covered by a block.
    pub fn goals_left(&self) -> usize {
        self.goals_left
    }

    /// Current (row, col) of the player.
    pub fn find_player(&self) -> (usize, usize) {
        self.player
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn cell(&self, row: usize, col: usize) -> Result<&Cell, BoardError> {
        if row >= self.height || col >= self.width {
            return Err(BoardError::IndexOutOfRange);
        }
        Ok(&self.cells[self.index(row, col)])
    }

    /// The visible symbol at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<Tile, BoardError> {
        Ok(self.cell(row, col)?.top())
    }

    /// Place an occupant at (row, col), covering whatever is visible there.
    ///
    /// This is a raw board edit: it does not touch the goal counter. Movement
    /// goes through [`Board::move_from`], which does.
    pub fn put(&mut self, row: usize, col: usize, occupant: Occupant) -> Result<(), BoardError> {
        self.cell(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx].occupant = Some(occupant);
        Ok(())
    }

    /// Remove and return the occupant at (row, col), revealing the terrain
    /// underneath. Terrain and seated blocks cannot be removed.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<Occupant, BoardError> {
        match self.cell(row, col)?.occupant {
            Some(occupant) if occupant.is_movable() => {
                let idx = self.index(row, col);
                self.cells[idx].occupant = None;
                Ok(occupant)
            }
            _ => Err(BoardError::NotRemovable),
        }
    }

    fn neighbor(
        &self,
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Result<(usize, usize), BoardError> {
        let (drow, dcol) = dir.delta();
        let row = row as isize + drow;
        let col = col as isize + dcol;
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return Err(BoardError::IndexOutOfRange);
        }
        Ok((row as usize, col as usize))
    }

    /// Push the occupant at (row, col) one step in the given direction,
    /// shoving any contiguous run of blocks in front of it. Returns the
    /// occupant's new position.
    ///
    /// The walk collects the run of movable occupants ahead of the mover; the
    /// run shifts iff the first cell past it is vacant walkable terrain. On
    /// any failure nothing is mutated. A block landing on a goal becomes a
    /// seated block and consumes the goal; a player on a goal does not.
    pub fn move_from(
        &mut self,
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Result<(usize, usize), BoardError> {
        match self.cell(row, col)?.occupant {
            Some(occupant) if occupant.is_movable() => {}
            _ => return Err(BoardError::NotMovable),
        }

        let mut chain = vec![(row, col)];
        let (mut r, mut c) = (row, col);
        let target = loop {
            let (nr, nc) = self.neighbor(r, c, dir)?;
            let cell = &self.cells[self.index(nr, nc)];
            match cell.occupant {
                None if cell.terrain.is_walkable() => break (nr, nc),
                None => return Err(BoardError::Blocked),
                Some(occupant) if occupant.is_movable() => {
                    chain.push((nr, nc));
                    (r, c) = (nr, nc);
                }
                Some(_) => return Err(BoardError::Blocked),
            }
        };

        // Shift the run one step, far end first, so all of it moves at once.
        let mut dest = target;
        for &(cr, cc) in chain.iter().rev() {
            let src = self.index(cr, cc);
            let occupant = self.cells[src].occupant.take();
            let dst = self.index(dest.0, dest.1);
            if self.cells[dst].terrain == Terrain::Goal && occupant == Some(Occupant::Block) {
                self.cells[dst].occupant = Some(Occupant::SeatedBlock);
                self.goals_left -= 1;
            } else {
                self.cells[dst].occupant = occupant;
            }
            dest = (cr, cc);
        }

        Ok(if chain.len() > 1 { chain[1] } else { target })
    }

    fn face_player(&mut self, facing: Facing) {
        let idx = self.index(self.player.0, self.player.1);
        if let Some(Occupant::Player(f)) = &mut self.cells[idx].occupant {
            *f = facing;
        }
    }

    /// Move the player one step in the given direction, pushing blocks along
    /// the way. The player always turns to face the direction, even when the
    /// move itself is blocked.
    pub fn move_player(&mut self, dir: Direction) {
        self.face_player(dir.facing());
        let (row, col) = self.player;
        match self.move_from(row, col, dir) {
            Ok(pos) => self.player = pos,
            Err(err) => debug!("player move {:?} failed: {}", dir, err),
        }
    }

    pub fn move_up(&mut self) {
        self.move_player(Direction::Up);
    }

    pub fn move_down(&mut self) {
        self.move_player(Direction::Down);
    }

    pub fn move_left(&mut self) {
        self.move_player(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.move_player(Direction::Right);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.cells[self.index(row, col)].top().to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
