//! Core domain types for the N x N board.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (player 1).
    X,
    /// Player O (player 2).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Seat number shown to humans: X is player 1, O is player 2.
    pub fn number(self) -> u8 {
        match self {
            Player::X => 1,
            Player::O => 2,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Returns the owner of the mark, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Single character used by the ASCII renderer.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Player::X) => 'X',
            Cell::Occupied(Player::O) => 'O',
        }
    }
}

/// Zero-based `(row, col)` address of a cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    derive_new::new,
)]
#[display("({}, {})", row, col)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index.
    pub fn col(&self) -> usize {
        self.col
    }
}

/// Error parsing a coordinate from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Malformed coordinate: {:?} (expected \"row col\", \"row-col\" or \"row,col\")", _0)]
pub struct CoordParseError(pub String);

impl std::error::Error for CoordParseError {}

impl FromStr for Coord {
    type Err = CoordParseError;

    /// Accepts `"1 2"`, `"1-2"` and `"1,2"`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == '-' || c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [row, col] => {
                let row = row
                    .parse::<usize>()
                    .map_err(|_| CoordParseError(s.to_string()))?;
                let col = col
                    .parse::<usize>()
                    .map_err(|_| CoordParseError(s.to_string()))?;
                Ok(Coord::new(row, col))
            }
            _ => Err(CoordParseError(s.to_string())),
        }
    }
}

/// Validated board size.
///
/// A line of length N only makes sense as a win condition from N = 3
/// upwards, so smaller sizes cannot be constructed. Sizes above
/// [`Dimension::MAX`] are refused too, which keeps `N * N` and the board
/// allocation bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "usize", into = "usize")]
#[display("{}x{}", _0, _0)]
pub struct Dimension(usize);

impl Dimension {
    /// Smallest playable board.
    pub const MIN: usize = 3;

    /// Largest accepted board.
    pub const MAX: usize = 1024;

    /// Validates a raw size.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, DimensionError> {
        if size < Self::MIN {
            return Err(DimensionError::TooSmall(size));
        }
        if size > Self::MAX {
            return Err(DimensionError::TooLarge(size));
        }
        Ok(Self(size))
    }

    /// Side length N.
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells, N * N.
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }

    /// True if the coordinate lies on the board.
    pub fn contains(self, coord: Coord) -> bool {
        coord.row() < self.0 && coord.col() < self.0
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<usize> for Dimension {
    type Error = DimensionError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<Dimension> for usize {
    fn from(dimension: Dimension) -> Self {
        dimension.0
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s
            .trim()
            .parse::<usize>()
            .map_err(|_| DimensionError::NotAnInteger(s.to_string()))?;
        Self::new(size)
    }
}

/// Rejected board size.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DimensionError {
    /// Fewer than three cells per side.
    #[display("Board size {} is too small (minimum 3)", _0)]
    TooSmall(usize),

    /// More cells per side than the engine will allocate.
    #[display("Board size {} is too large (maximum 1024)", _0)]
    TooLarge(usize),

    /// Input was not a non-negative integer.
    #[display("Board size {:?} is not an integer", _0)]
    NotAnInteger(String),
}

impl std::error::Error for DimensionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent().opponent(), Player::O);
    }

    #[test]
    fn test_player_numbers() {
        assert_eq!(Player::X.number(), 1);
        assert_eq!(Player::O.number(), 2);
    }

    #[test]
    fn test_coord_parses_separators() {
        assert_eq!("1 2".parse::<Coord>(), Ok(Coord::new(1, 2)));
        assert_eq!("0-4".parse::<Coord>(), Ok(Coord::new(0, 4)));
        assert_eq!(" 3,1 ".parse::<Coord>(), Ok(Coord::new(3, 1)));
    }

    #[test]
    fn test_coord_rejects_garbage() {
        assert!("".parse::<Coord>().is_err());
        assert!("1".parse::<Coord>().is_err());
        assert!("a b".parse::<Coord>().is_err());
        assert!("1 2 3".parse::<Coord>().is_err());
    }

    #[test]
    fn test_dimension_minimum() {
        assert_eq!(Dimension::new(2), Err(DimensionError::TooSmall(2)));
        assert_eq!(Dimension::new(0), Err(DimensionError::TooSmall(0)));
        assert_eq!(Dimension::new(3).map(Dimension::get), Ok(3));
        assert_eq!(Dimension::default().get(), 3);
    }

    #[test]
    fn test_dimension_maximum() {
        assert_eq!(Dimension::new(1024).map(Dimension::get), Ok(1024));
        assert_eq!(Dimension::new(1025), Err(DimensionError::TooLarge(1025)));
        assert_eq!(
            Dimension::new(usize::MAX),
            Err(DimensionError::TooLarge(usize::MAX))
        );
        assert_eq!(
            "5000".parse::<Dimension>(),
            Err(DimensionError::TooLarge(5000))
        );
        let largest = Dimension::new(Dimension::MAX).unwrap();
        assert_eq!(largest.cell_count(), 1024 * 1024);
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("5".parse::<Dimension>().map(Dimension::get), Ok(5));
        assert!(matches!(
            "4.5".parse::<Dimension>(),
            Err(DimensionError::NotAnInteger(_))
        ));
        assert!(matches!(
            "-3".parse::<Dimension>(),
            Err(DimensionError::NotAnInteger(_))
        ));
        assert_eq!("2".parse::<Dimension>(), Err(DimensionError::TooSmall(2)));
    }

    #[test]
    fn test_dimension_contains() {
        let dim = Dimension::new(4).unwrap();
        assert!(dim.contains(Coord::new(3, 3)));
        assert!(!dim.contains(Coord::new(4, 0)));
        assert!(!dim.contains(Coord::new(0, 4)));
        assert_eq!(dim.cell_count(), 16);
    }
}
