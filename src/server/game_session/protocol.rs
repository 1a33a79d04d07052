//! Per-pair session protocol.
//!
//! Decodes inbound payloads, enforces turn order and move legality, drives
//! the [`GameEngine`] and decides who hears about each state change.

use log::{debug, error};

use crate::game::{GameEngine, Symbol};
use crate::server::connection::Connection;
use crate::server::game_session::messages::{PlayerMessage, ServerMessage};
use crate::server::ws_error::ProtocolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove(Symbol),
    Terminal,
}

enum RecordOutcome {
    Continue,
    Finished,
}

pub struct SessionProtocol<C> {
    engine: GameEngine,
    x: C,
    o: C,
    terminal: bool,
}

fn send<C: Connection>(connection: &C, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(text) => connection.send(text),
        Err(e) => error!("[GameSession] Failed to serialize ServerMessage: {}", e),
    }
}

impl<C: Connection> SessionProtocol<C> {
    pub fn new(x: C, o: C) -> Self {
        Self {
            engine: GameEngine::new(),
            x,
            o,
            terminal: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The connection playing `symbol`.
    pub fn connection(&self, symbol: Symbol) -> &C {
        match symbol {
            Symbol::X => &self.x,
            Symbol::O => &self.o,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.terminal {
            SessionState::Terminal
        } else {
            SessionState::AwaitingMove(self.engine.turn())
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn both_open(&self) -> bool {
        self.x.is_open() && self.o.is_open()
    }

    /// Opens the session: only `x` is told about the empty board.
    ///
    /// A connection that is already gone forfeits immediately.
    pub fn start(&mut self) {
        if self.terminal {
            return;
        }
        for symbol in [Symbol::X, Symbol::O] {
            if !self.connection(symbol).is_open() {
                self.handle_disconnect(symbol);
                return;
            }
        }
        send(&self.x, &ServerMessage::moved(&self.engine.snapshot()));
    }

    /// Processes one payload from `sender`.
    ///
    /// Records are handled in order; the first rejected record or the move
    /// that ends the game discards the rest of the payload.
    pub fn handle_payload(&mut self, sender: Symbol, payload: &str) {
        if self.terminal || !self.both_open() {
            return;
        }
        for record in payload.trim().split('\n') {
            match self.handle_record(sender, record) {
                Ok(RecordOutcome::Continue) => {}
                Ok(RecordOutcome::Finished) => return,
                Err(err) => {
                    debug!("[GameSession] Rejected record from {}: {}", sender, err.code());
                    let reply = ServerMessage::error(err, &self.engine.snapshot());
                    send(self.connection(sender), &reply);
                    return;
                }
            }
        }
    }

    fn handle_record(&mut self, sender: Symbol, record: &str) -> Result<RecordOutcome, ProtocolError> {
        let message = PlayerMessage::parse(record)?;
        if sender != self.engine.turn() {
            return Err(ProtocolError::WrongTurn);
        }
        let cell = message.cell()?;
        self.engine
            .apply_move(cell)
            .map_err(|_| ProtocolError::CellOccupied)?;

        let snapshot = self.engine.snapshot();
        if snapshot.game_over {
            let stop = ServerMessage::stop(&snapshot);
            let order = [sender, sender.other()];
            for symbol in order {
                send(self.connection(symbol), &stop);
            }
            for symbol in order {
                self.connection(symbol).terminate();
            }
            self.terminal = true;
            return Ok(RecordOutcome::Finished);
        }

        send(self.connection(sender.other()), &ServerMessage::moved(&snapshot));
        Ok(RecordOutcome::Continue)
    }

    /// `leaver` closed or errored: its opponent wins.
    pub fn handle_disconnect(&mut self, leaver: Symbol) {
        if self.terminal {
            return;
        }
        self.engine.forfeit(leaver);
        self.terminal = true;

        let peer = self.connection(leaver.other());
        if peer.is_open() {
            send(peer, &ServerMessage::stop(&self.engine.snapshot()));
            peer.terminate();
        }
    }

    /// The side to move ran out of time: it forfeits and both sockets close.
    pub fn handle_idle_timeout(&mut self) {
        if self.terminal {
            return;
        }
        let idle = self.engine.turn();
        self.engine.forfeit(idle);
        self.terminal = true;

        let stop = ServerMessage::stop(&self.engine.snapshot());
        for symbol in [idle.other(), idle] {
            let connection = self.connection(symbol);
            if connection.is_open() {
                send(connection, &stop);
                connection.terminate();
            }
        }
    }
}
