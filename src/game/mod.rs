//! Pure game logic. No I/O.

pub mod board;
pub mod engine;
pub mod types;

pub use engine::{GameEngine, MoveError};
pub use types::{Cell, Snapshot, Symbol};
