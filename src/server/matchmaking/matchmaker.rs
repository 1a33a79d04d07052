//! Strict two-at-a-time pairing with a single waiting slot.

use log::debug;

use crate::server::connection::Connection;

/// Two connections to seat in a new session.
#[derive(Debug)]
pub struct Pairing<C> {
    /// The connection that just arrived. It moves first.
    pub x: C,
    /// The connection that was waiting.
    pub o: C,
}

pub struct Matchmaker<C> {
    pending: Option<C>,
}

impl<C> Default for Matchmaker<C> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<C: Connection> Matchmaker<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The connection waiting for an opponent, if any.
    pub fn pending(&self) -> Option<&C> {
        self.pending.as_ref()
    }

    /// Pairs `connection` with the waiting one, or makes it wait.
    ///
    /// A waiting connection that has closed is replaced rather than paired.
    pub fn accept(&mut self, connection: C) -> Option<Pairing<C>> {
        match self.pending.take() {
            Some(waiting) if waiting.is_open() => Some(Pairing {
                x: connection,
                o: waiting,
            }),
            Some(_) => {
                debug!("[Matchmaking] Replacing closed pending connection");
                self.pending = Some(connection);
                None
            }
            None => {
                self.pending = Some(connection);
                None
            }
        }
    }
}
