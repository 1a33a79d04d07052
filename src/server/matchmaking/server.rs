//! Matchmaking server actor.
//!
//! Owns the single waiting slot. Every accepted connection either waits or is
//! paired with the waiting one, in which case a [`GameSession`] is started and
//! both sockets are routed to it.

use actix::prelude::*;
use log::{info, warn};
use std::time::Duration;

use super::matchmaker::{Matchmaker, Pairing};
use super::messages::Accept;
use crate::game::Symbol;
use crate::server::connection::{PlayerHandle, SessionRoute};
use crate::server::game_session::server::GameSession;

pub struct MatchmakingServer {
    matchmaker: Matchmaker<PlayerHandle>,
    idle_timeout: Option<Duration>,
}

impl MatchmakingServer {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            matchmaker: Matchmaker::new(),
            idle_timeout,
        }
    }

    /// Starts the session and binds both sockets to it.
    fn start_session(&self, pairing: Pairing<PlayerHandle>) {
        let x_link = pairing.x.link().clone();
        let o_link = pairing.o.link().clone();
        let (x_id, o_id) = (pairing.x.id(), pairing.o.id());

        let session = GameSession::new(pairing.x, pairing.o, self.idle_timeout).start();
        for (link, symbol, id) in [(x_link, Symbol::X, x_id), (o_link, Symbol::O, o_id)] {
            let bound = link.bind(SessionRoute {
                session: session.clone(),
                symbol,
            });
            if !bound {
                warn!("[Matchmaking] Player {} closed while being paired", id);
            }
        }
    }
}

impl Actor for MatchmakingServer {
    type Context = Context<Self>;
}

impl Handler<Accept> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: Accept, _ctx: &mut Self::Context) -> Self::Result {
        let id = msg.handle.id();
        match self.matchmaker.accept(msg.handle) {
            Some(pairing) => {
                info!(
                    "[Matchmaking] A new game started: x={} o={}",
                    pairing.x.id(),
                    pairing.o.id()
                );
                self.start_session(pairing);
            }
            None => info!("[Matchmaking] Player {} is waiting for an opponent", id),
        }
    }
}
