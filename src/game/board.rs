//! Bit-set board representation and the board wire codec.
//!
//! Bit `i` of a [`CellSet`] marks cell `i`, cells being numbered 0..=8
//! row by row starting at the top-left corner.

use thiserror::Error;

use crate::game::types::{CELL_COUNT, Cell};

/// Winning lines checked after every move.
///
/// Only the three rows and the two diagonals are scored; columns are not.
pub const WIN_PATTERNS: [CellSet; 5] = [
    CellSet(0b111_000_000),
    CellSet(0b000_111_000),
    CellSet(0b000_000_111),
    CellSet(0b100_010_001),
    CellSet(0b001_010_100),
];

/// Every cell occupied.
pub const FULL_BOARD: CellSet = CellSet(0b111_111_111);

/// Occupancy of the board by one player (or the union of both).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellSet(u16);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);

    /// Set containing the single cell `index`, or `None` when off the board.
    pub fn single(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| CellSet(1 << index))
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, index: usize) -> bool {
        index < CELL_COUNT && self.0 & (1 << index) != 0
    }

    pub fn union(self, other: CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    pub fn intersects(self, other: CellSet) -> bool {
        self.0 & other.0 != 0
    }

    /// True when every cell of `pattern` is in this set.
    pub fn covers(self, pattern: CellSet) -> bool {
        self.0 & pattern.0 == pattern.0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Error returned when a board string cannot be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardDecodeError {
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("unknown cell token {token:?} at index {index}")]
    UnknownToken { index: usize, token: String },
    #[error("board is not comma-terminated")]
    MissingTerminator,
}

/// Encodes cells as comma-terminated tokens, e.g. `"X,_,O,_,_,_,_,_,_,"`.
pub fn encode_board(cells: &[Cell; CELL_COUNT]) -> String {
    let mut out = String::with_capacity(CELL_COUNT * 2);
    for cell in cells {
        out.push_str(cell.token());
        out.push(',');
    }
    out
}

/// Parses a board string produced by [`encode_board`].
pub fn decode_board(board: &str) -> Result<[Cell; CELL_COUNT], BoardDecodeError> {
    if board.is_empty() {
        return Err(BoardDecodeError::CellCount {
            expected: CELL_COUNT,
            found: 0,
        });
    }
    let tokens: Vec<&str> = board
        .strip_suffix(',')
        .ok_or(BoardDecodeError::MissingTerminator)?
        .split(',')
        .collect();
    if tokens.len() != CELL_COUNT {
        return Err(BoardDecodeError::CellCount {
            expected: CELL_COUNT,
            found: tokens.len(),
        });
    }

    let mut cells = [Cell::Empty; CELL_COUNT];
    for (index, token) in tokens.into_iter().enumerate() {
        cells[index] = Cell::from_token(token).ok_or_else(|| BoardDecodeError::UnknownToken {
            index,
            token: token.to_string(),
        })?;
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rejects_off_board() {
        assert_eq!(CellSet::single(0).map(CellSet::bits), Some(1));
        assert_eq!(CellSet::single(8).map(CellSet::bits), Some(0b1_0000_0000));
        assert!(CellSet::single(9).is_none());
    }

    #[test]
    fn test_covers_pattern() {
        let cells = CellSet::single(0)
            .unwrap()
            .union(CellSet::single(4).unwrap())
            .union(CellSet::single(8).unwrap());
        assert!(cells.covers(WIN_PATTERNS[3]));
        assert!(!cells.covers(WIN_PATTERNS[0]));
    }

    #[test]
    fn test_patterns_are_rows_and_diagonals_only() {
        let column = CellSet(0b001_001_001);
        assert!(WIN_PATTERNS.iter().all(|p| *p != column));
        assert!(WIN_PATTERNS.iter().all(|p| p.len() == 3));
    }

    #[test]
    fn test_encode_empty_board() {
        assert_eq!(encode_board(&[Cell::Empty; CELL_COUNT]), "_,_,_,_,_,_,_,_,_,");
    }

    #[test]
    fn test_decode_restores_every_cell() {
        let cells = [
            Cell::X, Cell::O, Cell::Empty,
            Cell::Empty, Cell::X, Cell::Empty,
            Cell::O, Cell::Empty, Cell::X,
        ];
        assert_eq!(decode_board(&encode_board(&cells)), Ok(cells));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert_eq!(
            decode_board("X,O,"),
            Err(BoardDecodeError::CellCount { expected: 9, found: 2 })
        );
        assert_eq!(
            decode_board(""),
            Err(BoardDecodeError::CellCount { expected: 9, found: 0 })
        );
        assert!(matches!(
            decode_board("X,O,_,_,_,_,_,_,Z,"),
            Err(BoardDecodeError::UnknownToken { index: 8, .. })
        ));
    }

    #[test]
    fn test_decode_requires_trailing_comma() {
        assert_eq!(
            decode_board("X,O,_,_,_,_,_,_,_"),
            Err(BoardDecodeError::MissingTerminator)
        );
        assert!(decode_board("X,O,_,_,_,_,_,_,_,").is_ok());
    }
}
