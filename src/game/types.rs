use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The mark a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The symbol of the other player.
    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => f.write_str("x"),
            Symbol::O => f.write_str("o"),
        }
    }
}

/// Content of a single board cell as seen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    X,
    O,
    Empty,
}

impl Cell {
    /// Token used for this cell in the board string.
    pub fn token(self) -> &'static str {
        match self {
            Cell::X => "X",
            Cell::O => "O",
            Cell::Empty => "_",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "X" => Some(Cell::X),
            "O" => Some(Cell::O),
            "_" => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }
}

/// Immutable view of the game at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: [Cell; CELL_COUNT],
    pub game_over: bool,
    pub winner: Option<Symbol>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_symbol() {
        assert_eq!(Symbol::X.other(), Symbol::O);
        assert_eq!(Symbol::O.other(), Symbol::X);
    }

    #[test]
    fn test_symbol_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Symbol::X).unwrap(), r#""x""#);
        assert_eq!(serde_json::from_str::<Symbol>(r#""o""#).unwrap(), Symbol::O);
    }

    #[test]
    fn test_cell_tokens() {
        for cell in [Cell::X, Cell::O, Cell::Empty] {
            assert_eq!(Cell::from_token(cell.token()), Some(cell));
        }
        assert_eq!(Cell::from_token("x"), None);
    }
}
