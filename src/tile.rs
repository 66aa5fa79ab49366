use std::fmt;

/// Permanent terrain of a cell, revealed when an occupant moves away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Wall,
    Floor,
    Goal,
}

impl Terrain {
    pub fn is_walkable(self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Goal)
    }
}

/// Orientation of the player sprite. The level alphabet uses the vim motion
/// keys (`h`/`j`/`k`/`l`) for the four variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

/// An entity layered over terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Block,
    /// A block parked on a goal. Never moves again.
    SeatedBlock,
    Player(Facing),
}

impl Occupant {
    pub fn is_movable(self) -> bool {
        !matches!(self, Occupant::SeatedBlock)
    }

    pub fn is_player(self) -> bool {
        matches!(self, Occupant::Player(_))
    }
}

/// The visible symbol at a board position: the occupant if one is present,
/// the terrain otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Goal,
    Block,
    BlockOnGoal,
    Player(Facing),
}

impl Tile {
    /// Parse one character of the level alphabet.
    ///
    /// Characters:
    /// - `w` = Wall
    /// - `f` = Floor
    /// - `g` = Goal (target location for blocks)
    /// - `b` = Block
    /// - `o` = Block on goal
    /// - `h`/`j`/`k`/`l` = Player facing left/down/up/right
    pub fn from_char(ch: char) -> Option<Tile> {
        match ch {
            'w' => Some(Tile::Wall),
            'f' => Some(Tile::Floor),
            'g' => Some(Tile::Goal),
            'b' => Some(Tile::Block),
            'o' => Some(Tile::BlockOnGoal),
            'h' => Some(Tile::Player(Facing::Left)),
            'j' => Some(Tile::Player(Facing::Down)),
            'k' => Some(Tile::Player(Facing::Up)),
            'l' => Some(Tile::Player(Facing::Right)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Wall => 'w',
            Tile::Floor => 'f',
            Tile::Goal => 'g',
            Tile::Block => 'b',
            Tile::BlockOnGoal => 'o',
            Tile::Player(Facing::Left) => 'h',
            Tile::Player(Facing::Down) => 'j',
            Tile::Player(Facing::Up) => 'k',
            Tile::Player(Facing::Right) => 'l',
        }
    }

    pub fn is_player(self) -> bool {
        matches!(self, Tile::Player(_))
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Goal)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for ch in ['w', 'f', 'g', 'b', 'o', 'h', 'j', 'k', 'l'] {
            let tile = Tile::from_char(ch).unwrap();
            assert_eq!(tile.to_char(), ch);
        }
        assert_eq!(Tile::from_char('x'), None);
        assert_eq!(Tile::from_char(' '), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(Tile::Floor.is_walkable());
        assert!(Tile::Goal.is_walkable());
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::Block.is_walkable());

        assert!(Occupant::Block.is_movable());
        assert!(Occupant::Player(Facing::Up).is_movable());
        assert!(!Occupant::SeatedBlock.is_movable());

        assert!(Occupant::Player(Facing::Left).is_player());
        assert!(!Occupant::Block.is_player());
    }
}
