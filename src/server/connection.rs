//! Transport abstraction used by the matchmaker and the session protocol.
//!
//! The core only needs to push text to a peer, ask whether it is still
//! connected and force it closed. [`PlayerHandle`] implements this on top of
//! a WebSocket actor; tests provide their own in-memory connections.

use actix::prelude::*;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::game::Symbol;
use crate::server::game_session::server::GameSession;

/// A duplex, message-framed connection to one player.
pub trait Connection {
    /// Queues a text payload for the peer.
    fn send(&self, payload: String);
    /// False once the peer disconnected or the connection was terminated.
    fn is_open(&self) -> bool;
    /// Forcibly closes the connection.
    fn terminate(&self);
}

/// Command delivered to a socket actor.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
#[rtype(result = "()")]
pub enum SocketCommand {
    Send(String),
    Terminate,
}

/// Where a paired socket forwards its traffic.
#[derive(Clone)]
pub struct SessionRoute {
    pub session: Addr<GameSession>,
    pub symbol: Symbol,
}

#[derive(Default)]
struct LinkState {
    closed: bool,
    route: Option<SessionRoute>,
}

/// State shared between a socket actor and the session it is paired into.
///
/// Binding and closing take the same lock: a socket that closes after
/// being bound always sees its route, and one that closed before is seen
/// as closed by the session.
#[derive(Default)]
pub struct ConnectionLink {
    state: Mutex<LinkState>,
}

impl ConnectionLink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_open(&self) -> bool {
        !self.lock().closed
    }

    /// Routes this connection's traffic to a session.
    ///
    /// Returns false when the connection had already closed.
    pub fn bind(&self, route: SessionRoute) -> bool {
        let mut state = self.lock();
        state.route = Some(route);
        !state.closed
    }

    pub fn route(&self) -> Option<SessionRoute> {
        self.lock().route.clone()
    }

    /// Marks the connection closed and returns the session to notify, if any.
    pub fn mark_closed(&self) -> Option<SessionRoute> {
        let mut state = self.lock();
        state.closed = true;
        state.route.clone()
    }
}

/// Production [`Connection`]: a socket actor plus its link.
#[derive(Clone)]
pub struct PlayerHandle {
    id: Uuid,
    socket: Recipient<SocketCommand>,
    link: Arc<ConnectionLink>,
}

impl PlayerHandle {
    pub fn new(id: Uuid, socket: Recipient<SocketCommand>, link: Arc<ConnectionLink>) -> Self {
        Self {
            id,
            socket,
            link,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn link(&self) -> &Arc<ConnectionLink> {
        &self.link
    }
}

impl fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("id", &self.id)
            .field("open", &self.link.is_open())
            .finish()
    }
}

impl Connection for PlayerHandle {
    fn send(&self, payload: String) {
        self.socket.do_send(SocketCommand::Send(payload));
    }

    fn is_open(&self) -> bool {
        self.link.is_open() && self.socket.connected()
    }

    fn terminate(&self) {
        self.link.mark_closed();
        self.socket.do_send(SocketCommand::Terminate);
    }
}

#[cfg(test)]
pub mod mock {
    //! In-memory [`Connection`] used by the core's unit tests.

    use super::Connection;
    use crate::server::game_session::messages::ServerMessage;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockState {
        sent: Vec<String>,
        closed: bool,
        terminated: bool,
    }

    #[derive(Clone, Default)]
    pub struct MockConnection {
        state: Rc<RefCell<MockState>>,
    }

    impl MockConnection {
        pub fn new() -> Self {
            Self::default()
        }

        /// Simulates the peer going away.
        pub fn close(&self) {
            self.state.borrow_mut().closed = true;
        }

        pub fn was_terminated(&self) -> bool {
            self.state.borrow().terminated
        }

        /// Drains and decodes everything sent so far.
        pub fn take_sent(&self) -> Vec<ServerMessage> {
            self.state
                .borrow_mut()
                .sent
                .drain(..)
                .map(|text| serde_json::from_str(&text).unwrap())
                .collect()
        }

        pub fn same_as(&self, other: &MockConnection) -> bool {
            Rc::ptr_eq(&self.state, &other.state)
        }
    }

    impl Connection for MockConnection {
        fn send(&self, payload: String) {
            self.state.borrow_mut().sent.push(payload);
        }

        fn is_open(&self) -> bool {
            !self.state.borrow().closed
        }

        fn terminate(&self) {
            let mut state = self.state.borrow_mut();
            state.closed = true;
            state.terminated = true;
        }
    }
}
