use actix::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::game::board::encode_board;
use crate::game::types::CELL_COUNT;
use crate::game::{Snapshot, Symbol};
use crate::server::ws_error::ProtocolError;

/// One inbound record: `{"move": <cell>}`. Other fields are ignored.
#[derive(Debug)]
pub struct PlayerMessage {
    pub cell: Option<Value>,
}

impl PlayerMessage {
    /// Parses a single record. Only text that is not JSON is malformed; any
    /// other JSON value without a `move` field parses with no cell.
    pub fn parse(record: &str) -> Result<Self, ProtocolError> {
        let mut value: Value = serde_json::from_str(record).map_err(|_| ProtocolError::Malformed)?;
        let cell = value.get_mut("move").map(Value::take);
        Ok(Self { cell })
    }

    /// The requested cell, validated against the board size.
    pub fn cell(&self) -> Result<usize, ProtocolError> {
        let number = match &self.cell {
            Some(Value::Number(number)) => number,
            _ => return Err(ProtocolError::MissingMove),
        };
        let cell = number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0 && *value >= 0.0)
                .map(|value| value as u64)
        });
        match cell {
            Some(cell) if cell < CELL_COUNT as u64 => Ok(cell as usize),
            _ => Err(ProtocolError::OutOfRange),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Move,
    Stop,
    Error,
}

/// Server -> client message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub board: String,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Symbol>,
}

impl ServerMessage {
    fn with_snapshot(kind: MessageType, message: Option<String>, snapshot: &Snapshot) -> Self {
        Self {
            kind,
            message,
            board: encode_board(&snapshot.board),
            game_over: snapshot.game_over,
            winner: snapshot.winner,
        }
    }

    pub fn moved(snapshot: &Snapshot) -> Self {
        Self::with_snapshot(MessageType::Move, None, snapshot)
    }

    pub fn stop(snapshot: &Snapshot) -> Self {
        Self::with_snapshot(MessageType::Stop, None, snapshot)
    }

    pub fn error(err: ProtocolError, snapshot: &Snapshot) -> Self {
        Self::with_snapshot(MessageType::Error, Some(err.to_string()), snapshot)
    }
}

/// Text payload received from a paired socket.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct Inbound {
    pub sender: Symbol,
    pub payload: String,
}

/// A paired socket closed or errored.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct Disconnected {
    pub symbol: Symbol,
}
