//! Rejections reported to a player over the WebSocket.
//!
//! None of them end the session or touch the board. The `Display` text is the
//! `message` field of the outbound `error` message; [`ProtocolError::code`]
//! is the short kind used in logs.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Record is not valid JSON.
    #[error("invalid message format (should be json)")]
    Malformed,
    #[error("not your turn")]
    WrongTurn,
    /// Record has no numeric `move` field.
    #[error("expected move property in json")]
    MissingMove,
    /// `move` is not an integer in 0..=8.
    #[error("invalid move")]
    OutOfRange,
    #[error("square is taken")]
    CellOccupied,
}

impl ProtocolError {
    pub fn code(self) -> &'static str {
        match self {
            ProtocolError::Malformed => "malformed",
            ProtocolError::WrongTurn => "wrong-turn",
            ProtocolError::MissingMove => "missing-move",
            ProtocolError::OutOfRange => "out-of-range",
            ProtocolError::CellOccupied => "cell-occupied",
        }
    }
}
