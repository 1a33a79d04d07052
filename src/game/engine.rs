//! Game state machine: move application, win and draw detection.

use log::debug;
use thiserror::Error;

use crate::game::board::{CellSet, FULL_BOARD, WIN_PATTERNS};
use crate::game::types::{CELL_COUNT, Cell, Snapshot, Symbol};

/// Reason a move was not applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("cell {0} is already occupied")]
    CellOccupied(usize),
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    x_cells: CellSet,
    o_cells: CellSet,
    turn: Symbol,
    game_over: bool,
    winner: Option<Symbol>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Empty board, `x` to move.
    pub fn new() -> Self {
        Self {
            x_cells: CellSet::EMPTY,
            o_cells: CellSet::EMPTY,
            turn: Symbol::X,
            game_over: false,
            winner: None,
        }
    }

    pub fn turn(&self) -> Symbol {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    /// Union of both players' cells.
    pub fn occupied(&self) -> CellSet {
        self.x_cells.union(self.o_cells)
    }

    fn cells(&self, symbol: Symbol) -> CellSet {
        match symbol {
            Symbol::X => self.x_cells,
            Symbol::O => self.o_cells,
        }
    }

    fn cells_mut(&mut self, symbol: Symbol) -> &mut CellSet {
        match symbol {
            Symbol::X => &mut self.x_cells,
            Symbol::O => &mut self.o_cells,
        }
    }

    /// Places the current player's mark on `cell`.
    ///
    /// Nothing changes when the move is rejected.
    pub fn apply_move(&mut self, cell: usize) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let target = CellSet::single(cell).ok_or(MoveError::OutOfRange(cell))?;
        if self.occupied().intersects(target) {
            return Err(MoveError::CellOccupied(cell));
        }

        let mover = self.turn;
        let cells = self.cells_mut(mover);
        *cells = cells.union(target);
        self.turn = mover.other();
        self.check_game_over();
        Ok(())
    }

    /// Ends the game with `loser`'s opponent as the winner.
    ///
    /// Has no effect on a game that is already over.
    pub fn forfeit(&mut self, loser: Symbol) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.winner = Some(loser.other());
        debug!("[GameEngine] {} forfeits, {} wins", loser, loser.other());
    }

    fn check_game_over(&mut self) {
        for symbol in [Symbol::X, Symbol::O] {
            let cells = self.cells(symbol);
            if WIN_PATTERNS.iter().any(|pattern| cells.covers(*pattern)) {
                self.game_over = true;
                self.winner = Some(symbol);
                return;
            }
        }
        if self.occupied().covers(FULL_BOARD) {
            self.game_over = true;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut board = [Cell::Empty; CELL_COUNT];
        for (index, cell) in board.iter_mut().enumerate() {
            if self.o_cells.contains(index) {
                *cell = Cell::O;
            } else if self.x_cells.contains(index) {
                *cell = Cell::X;
            }
        }
        Snapshot {
            board,
            game_over: self.game_over,
            winner: self.winner,
        }
    }
}
